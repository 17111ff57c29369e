//! matchup_engine - Pokemon type matchup computation core
//!
//! Computes type effectiveness across three rule-set eras (generation "1",
//! "2-5", and "6+"), overlays ability/move/field exceptions on the base
//! charts, groups results by multiplier, and diffs successive results so a
//! consumer only redraws what changed. Selection handling lives in an
//! explicit state machine with first-class enabled/disabled control state.

/// Type identifiers, generations, and type sets
pub mod types;

/// Fixed-point effectiveness multiplier
pub mod mult;

/// Generation chart storage and transpose reads
pub mod chart;

/// Exception registry, table, and application strategies
pub mod exceptions;

/// Effectiveness computation, grouping, ordering, and diffing
pub mod effect;

/// Data document loading and memoization
pub mod loader;

/// Selection state machine
pub mod session;

// Re-export commonly used types
pub use chart::TypeChart;
pub use effect::{compute_effectiveness, EffectGroups, Label, MultOrderIndex, RenderCache};
pub use exceptions::{ExceptionId, ExceptionSet, ExceptionTable};
pub use loader::{BundledSource, DataSource, DataStore, LoadError, RequestToken};
pub use mult::Mult;
pub use session::{ControlState, Selection, SelectionSession};
pub use types::{Generation, Mode, Type, TypeSet};
