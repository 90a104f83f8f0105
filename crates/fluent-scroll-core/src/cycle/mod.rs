//! Wrap-around picker columns
//!
//! - `view` - Pure slot space: duplication, padding and slot resolution
//! - `list` - Column state: current slot, scroll animation, re-centring

pub mod list;
pub mod view;

pub use list::{CycleEvent, CycleList};
pub use view::{CyclicSequenceView, Slot};
