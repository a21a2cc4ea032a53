//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod error;
mod landmarks;
mod logger;
mod trials;

pub use error::BridgeError;
pub use landmarks::parse_frame;
pub use logger::init_logger;
pub use trials::{
    feed_landmarks, feed_stability, finalize_stability, finalize_trial, get_skeleton_color,
    get_skeleton_pairs, get_stability_color, get_status_text, reset_stability, reset_trial,
    set_calibration, CameraView,
};
