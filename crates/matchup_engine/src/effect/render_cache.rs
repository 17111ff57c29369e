//! Last-rendered grouping cache and diff layer.
//!
//! Determines, group by group, whether the renderer needs to touch a
//! result group at all. Equality is label-set membership only, never a
//! size shortcut, so an unchanged group is never re-emitted and any
//! membership change (including a group emptying out) always is.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::mult::Mult;

use super::groups::{EffectGroups, Label};

/// The grouping as last handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    groups: HashMap<Mult, HashSet<Label>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a fresh grouping against the cache and return the groups the
    /// renderer must redraw, descending by multiplier.
    ///
    /// With `force_all` (restoring a cached, not-yet-cleared result on
    /// backward navigation) every group in `next` is emitted and the cache
    /// is overwritten wholesale. Otherwise only groups whose membership
    /// differs are emitted, and only those entries are written back. A
    /// cached group absent from `next` is emitted with an empty label set
    /// and evicted, so the renderer clears its row.
    pub fn reconcile(
        &mut self,
        next: &EffectGroups,
        force_all: bool,
    ) -> Vec<(Mult, HashSet<Label>)> {
        let mut changed: Vec<(Mult, HashSet<Label>)> = Vec::new();
        if force_all {
            self.groups.clear();
            for (mult, labels) in next.iter() {
                self.groups.insert(mult, labels.clone());
                changed.push((mult, labels.clone()));
            }
        } else {
            for (mult, labels) in next.iter() {
                let unchanged = self
                    .groups
                    .get(&mult)
                    .is_some_and(|cached| cached == labels);
                if !unchanged {
                    self.groups.insert(mult, labels.clone());
                    changed.push((mult, labels.clone()));
                }
            }
            let vanished: Vec<Mult> = self
                .groups
                .keys()
                .copied()
                .filter(|mult| next.get(*mult).is_none())
                .collect();
            for mult in vanished {
                self.groups.remove(&mult);
                changed.push((mult, HashSet::new()));
            }
        }
        changed.sort_by(|a, b| b.0.cmp(&a.0));
        trace!(
            changed = changed.len(),
            total = next.len(),
            force_all,
            "reconciled result groups"
        );
        changed
    }

    /// Cached membership for one multiplier group.
    pub fn get(&self, mult: Mult) -> Option<&HashSet<Label>> {
        self.groups.get(&mult)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Drop everything; used when a mode/generation session is discarded.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
