//! Session-scoped index over every multiplier value seen so far.
//!
//! Answers "which existing lower group should a never-before-seen
//! multiplier's result group be placed above" without re-sorting the
//! rendered list. The source kept a hand-rolled linked list; a sorted
//! vector with binary insertion honors the same contracts (strictly
//! descending traversal, idempotent insert).

use crate::mult::Mult;

/// Descending index of distinct multiplier values.
#[derive(Debug, Clone, Default)]
pub struct MultOrderIndex {
    /// Strictly descending.
    values: Vec<Mult>,
}

impl MultOrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, keeping descending order. Idempotent: inserting an
    /// existing value returns its position without creating a duplicate.
    pub fn insert(&mut self, mult: Mult) -> usize {
        match self.position_of(mult) {
            Ok(pos) => pos,
            Err(pos) => {
                self.values.insert(pos, mult);
                pos
            }
        }
    }

    /// Position of a value, if present.
    pub fn find(&self, mult: Mult) -> Option<usize> {
        self.position_of(mult).ok()
    }

    /// The largest indexed value strictly below `mult`, if any. This is the
    /// group a newly created result group is inserted before.
    pub fn next_lower(&self, mult: Mult) -> Option<Mult> {
        let pos = match self.position_of(mult) {
            Ok(pos) => pos + 1,
            Err(pos) => pos,
        };
        self.values.get(pos).copied()
    }

    /// All indexed values, strictly descending.
    pub fn iter(&self) -> impl Iterator<Item = Mult> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn position_of(&self, mult: Mult) -> Result<usize, usize> {
        // Descending order, so compare reversed.
        self.values.binary_search_by(|probe| mult.cmp(probe))
    }
}
