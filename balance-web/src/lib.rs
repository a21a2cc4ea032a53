//! Balance Web - pose-based balance assessment in the browser
//!
//! Entry point for the WASM module. Only contains:
//! - Module declarations
//! - The start hook and public re-exports

mod bridge;
pub mod config;
pub mod hands;
pub mod overlay;
pub mod pose;
pub mod posture;
pub mod scoring;
pub mod session;
pub mod stability;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    feed_landmarks, feed_stability, finalize_stability, finalize_trial, get_skeleton_color,
    get_skeleton_pairs, get_stability_color, get_status_text, parse_frame, reset_stability,
    reset_trial, set_calibration, BridgeError, CameraView,
};
pub use config::AnalysisConfig;
pub use session::{AnalysisRecord, AnalysisSession, StabilityRecord, StabilitySession};

/// Called automatically when the WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    bridge::init_logger(log::LevelFilter::Info);
    log::info!("balance-web ready");
}
