//! Posture module - sitting/standing classification and stabilization
//!
//! Re-exports only. All logic in submodules.

mod buffer;
mod height;
mod measurements;
mod result;
mod sitting;
mod stabilizer;
mod standing;

#[cfg(test)]
pub(crate) mod testing;

pub use buffer::RingBuffer;
pub use height::{HeightSnapshot, HeightTracker};
pub use measurements::PostureMeasurements;
pub use result::{raw_posture, PostureDetails, PostureResult, PostureState, SignalPoints};
pub use sitting::{detect_sitting, score_sitting};
pub use stabilizer::{Observation, StateStabilizer};
pub use standing::{detect_standing, score_standing};
