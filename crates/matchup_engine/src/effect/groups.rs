//! Result grouping: multiplier value -> set of affected output labels.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::mult::Mult;
use crate::types::Type;

use super::order_index::MultOrderIndex;

/// An output row label. Almost always a plain type name; the stellar chart
/// row renders as the synthetic "tera_pokemon" label when a stellar input
/// is active on offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Type(Type),
    TeraPokemon,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Type(ty) => ty.name(),
            Label::TeraPokemon => "tera_pokemon",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One full effectiveness grouping, produced fresh by every computation.
///
/// Group membership is what matters for equality; iteration order is left
/// to the order index / diff layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectGroups {
    groups: HashMap<Mult, HashSet<Label>>,
}

impl EffectGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label into the group for `mult`, registering the value in
    /// the order index when this is its first occurrence in the grouping.
    pub fn insert(&mut self, mult: Mult, label: Label, order: &mut MultOrderIndex) {
        match self.groups.entry(mult) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().insert(label);
            }
            Entry::Vacant(entry) => {
                order.insert(mult);
                entry.insert(HashSet::from([label]));
            }
        }
    }

    pub fn get(&self, mult: Mult) -> Option<&HashSet<Label>> {
        self.groups.get(&mult)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mult, &HashSet<Label>)> {
        self.groups.iter().map(|(mult, set)| (*mult, set))
    }

    /// Union of every label across all groups.
    pub fn all_labels(&self) -> HashSet<Label> {
        self.groups.values().flatten().copied().collect()
    }
}
