//! Hands module - hand position and pushing-off detection
//!
//! Re-exports only. All logic in submodules.

mod detector;
mod trajectory;
mod types;

pub use detector::{HandSupportDetector, TransitionContext};
pub use trajectory::WristSample;
pub use types::{HandDebug, HandPosition, HandReading, HandSupport, PushSignal, SupportRule};
