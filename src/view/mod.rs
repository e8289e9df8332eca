//! Display slots and their refresh logic.
//!
//! Slots are created once from an initial tally and afterwards only have
//! their values rewritten.

mod registry;
mod slots;

pub(crate) use registry::TallyTarget;
pub use registry::{ChartState, SlotRegistry};
pub use slots::format_value;
