//! Per-view trial stores and their wasm entry points
//!
//! One sit-to-stand session and one stability session per camera view.
//! Calibration set from JS applies to sessions created or reset after it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::config::AnalysisConfig;
use crate::overlay::{colors, skeleton_indices, to_css};
use crate::session::{AnalysisSession, StabilitySession};
use super::error::BridgeError;
use super::landmarks::parse_frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraView {
    Side,
    Front,
}

impl FromStr for CameraView {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "side" => Ok(CameraView::Side),
            "front" => Ok(CameraView::Front),
            _ => Err(BridgeError::UnknownView(s.to_string())),
        }
    }
}

thread_local! {
    static CALIBRATION: RefCell<AnalysisConfig> = RefCell::new(AnalysisConfig::default());
    static TRIALS: RefCell<HashMap<CameraView, AnalysisSession>> = RefCell::new(HashMap::new());
    static STABILITY: RefCell<HashMap<CameraView, StabilitySession>> = RefCell::new(HashMap::new());
}

fn calibration() -> AnalysisConfig {
    CALIBRATION.with(|c| c.borrow().clone())
}

fn with_trial<R>(view: CameraView, f: impl FnOnce(&mut AnalysisSession) -> R) -> R {
    TRIALS.with(|cell| {
        let mut trials = cell.borrow_mut();
        let session = trials.entry(view).or_insert_with(|| AnalysisSession::new(calibration()));
        f(session)
    })
}

fn with_stability<R>(view: CameraView, f: impl FnOnce(&mut StabilitySession) -> R) -> R {
    STABILITY.with(|cell| {
        let mut sessions = cell.borrow_mut();
        let session = sessions.entry(view).or_insert_with(|| StabilitySession::new(calibration()));
        f(session)
    })
}

/// Timestamps from JS are milliseconds; a missing one falls back to the wall clock
fn frame_time(timestamp: f64) -> f64 {
    if timestamp.is_finite() { timestamp } else { js_sys::Date::now() }
}

/// Load a (possibly partial) calibration JSON
#[wasm_bindgen]
pub fn set_calibration(json: &str) -> Result<(), JsValue> {
    let config = AnalysisConfig::from_json(json).map_err(BridgeError::InvalidCalibration)?;
    CALIBRATION.with(|c| *c.borrow_mut() = config);
    log::info!("calibration updated");
    Ok(())
}

// ============================================================================
// SIT-TO-STAND
// ============================================================================

/// Start a fresh sit-to-stand trial for one view
#[wasm_bindgen]
pub fn reset_trial(view: &str) -> Result<(), JsValue> {
    let view: CameraView = view.parse()?;
    let config = calibration();
    with_trial(view, |session| session.reconfigure(config));
    log::info!("{:?} trial reset", view);
    Ok(())
}

/// Analyze one frame; returns the record as JSON, or undefined when no
/// person was detected
#[wasm_bindgen]
pub fn feed_landmarks(view: &str, data: &[f32], timestamp: f64) -> Result<Option<String>, JsValue> {
    let view: CameraView = view.parse()?;
    let frame = parse_frame(data)?;
    let record = with_trial(view, |session| session.feed(frame.as_ref(), frame_time(timestamp)));
    match record {
        Some(r) => Ok(Some(serde_json::to_string(&r).map_err(BridgeError::from)?)),
        None => Ok(None),
    }
}

/// Score the trial so far and return the report as JSON
#[wasm_bindgen]
pub fn finalize_trial(view: &str) -> Result<String, JsValue> {
    let view: CameraView = view.parse()?;
    let report = with_trial(view, |session| session.finalize());
    Ok(serde_json::to_string(&report).map_err(BridgeError::from)?)
}

/// Status line for the latest frame of a view's trial
#[wasm_bindgen]
pub fn get_status_text(view: &str) -> Result<String, JsValue> {
    let view: CameraView = view.parse()?;
    Ok(with_trial(view, |session| {
        session
            .latest()
            .map(|r| r.status_line())
            .unwrap_or_else(|| "Waiting for pose...".to_string())
    }))
}

/// CSS color for the skeleton of a view's latest frame
#[wasm_bindgen]
pub fn get_skeleton_color(view: &str) -> Result<String, JsValue> {
    let view: CameraView = view.parse()?;
    Ok(with_trial(view, |session| {
        session.latest().map(|r| r.css_color()).unwrap_or_else(|| to_css(colors::YELLOW))
    }))
}

/// Bones to draw, as flat landmark index pairs
#[wasm_bindgen]
pub fn get_skeleton_pairs() -> Vec<u32> {
    skeleton_indices()
}

// ============================================================================
// QUIET STANDING
// ============================================================================

#[wasm_bindgen]
pub fn reset_stability(view: &str) -> Result<(), JsValue> {
    let view: CameraView = view.parse()?;
    let config = calibration();
    with_stability(view, |session| session.reconfigure(config));
    log::info!("{:?} stability trial reset", view);
    Ok(())
}

#[wasm_bindgen]
pub fn feed_stability(view: &str, data: &[f32], timestamp: f64) -> Result<Option<String>, JsValue> {
    let view: CameraView = view.parse()?;
    let frame = parse_frame(data)?;
    let record = with_stability(view, |session| session.feed(frame.as_ref(), frame_time(timestamp)));
    match record {
        Some(r) => Ok(Some(serde_json::to_string(&r).map_err(BridgeError::from)?)),
        None => Ok(None),
    }
}

#[wasm_bindgen]
pub fn finalize_stability(view: &str) -> Result<String, JsValue> {
    let view: CameraView = view.parse()?;
    let report = with_stability(view, |session| session.finalize());
    Ok(serde_json::to_string(&report).map_err(BridgeError::from)?)
}

#[wasm_bindgen]
pub fn get_stability_color(view: &str) -> Result<String, JsValue> {
    let view: CameraView = view.parse()?;
    Ok(with_stability(view, |session| {
        session.latest().map(|r| r.css_color()).unwrap_or_else(|| to_css(colors::YELLOW))
    }))
}
