//! Stability module - sway and support signals for quiet standing
//!
//! Re-exports only. All logic in submodules.

mod reach;
mod sway;

pub use reach::ReachDetector;
pub use sway::{SwayLevel, SwayReading, SwayTracker};
