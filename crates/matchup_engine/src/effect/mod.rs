//! Effectiveness computation and result diffing.
//!
//! [`compute_effectiveness`] is the pure core: charts and the exception
//! table go in, a fresh multiplier grouping comes out. The order index and
//! render cache around it exist so the consumer can place and redraw only
//! the groups that actually changed.

mod engine;
mod groups;
mod order_index;
mod render_cache;


pub use engine::compute_effectiveness;
pub use groups::{EffectGroups, Label};
pub use order_index::MultOrderIndex;
pub use render_cache::RenderCache;
