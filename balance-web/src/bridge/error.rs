//! Errors surfaced to JavaScript

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid landmark data length: {0} (expected 132 or 99)")]
    InvalidLandmarkLength(usize),
    #[error("unknown camera view '{0}' (expected 'side' or 'front')")]
    UnknownView(String),
    #[error("invalid calibration: {0}")]
    InvalidCalibration(#[source] serde_json::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
