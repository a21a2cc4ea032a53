//! Calibration parameters for the analysis pipeline
//!
//! Every threshold below was tuned empirically against recorded trials.
//! They are kept as data so a clinic can override them from JS
//! (`set_calibration`) without touching the algorithms.

use serde::{Deserialize, Serialize};

/// Root configuration handed to every session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub stabilizer: StabilizerConfig,
    pub hands: HandSupportConfig,
    pub scoring: ScoringConfig,
    pub stability: StabilityConfig,
}

impl AnalysisConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Soft-voting posture classifier constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Per-landmark visibility needed for a signal to contribute
    pub min_visibility: f32,
    /// Average shoulder/hip visibility needed to classify at all
    pub min_torso_visibility: f32,

    /// Frames in the nose-height moving average
    pub height_window: usize,
    /// Samples needed before the standing baseline is taken
    pub baseline_samples: usize,

    pub sitting_ratio_max: f32,
    pub sitting_ratio_scale: f32,
    pub sitting_ratio_cap: f32,
    pub standing_ratio_min: f32,
    pub standing_ratio_scale: f32,
    pub standing_ratio_cap: f32,
    /// Shoulder-hip distance below which the ratio is not trusted
    pub min_torso_length: f32,
    /// Ratio used when the torso is too short to divide by
    pub neutral_ratio: f32,

    pub sitting_offset_max: f32,
    pub sitting_offset_cap: f32,
    pub standing_offset_min: f32,
    pub standing_offset_span: f32,
    pub standing_offset_cap: f32,

    pub sitting_drop_min: f32,
    pub sitting_drop_span: f32,
    pub standing_drop_max: f32,
    pub height_cap: f32,
    /// Standing points while the baseline is not yet known
    pub unset_baseline_points: f32,

    pub sitting_knee_min: f32,
    pub sitting_knee_max: f32,
    pub sitting_knee_center: f32,
    pub standing_knee_min: f32,
    pub standing_knee_full: f32,
    pub knee_cap: f32,

    pub alignment_max_deviation: f32,
    pub standing_extent_min: f32,
    pub alignment_points: f32,

    pub sitting_threshold: f32,
    pub standing_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_visibility: 0.3,
            min_torso_visibility: 0.3,
            height_window: 30,
            baseline_samples: 5,
            sitting_ratio_max: 1.4,
            sitting_ratio_scale: 60.0,
            sitting_ratio_cap: 40.0,
            standing_ratio_min: 1.5,
            standing_ratio_scale: 35.0,
            standing_ratio_cap: 35.0,
            min_torso_length: 0.05,
            neutral_ratio: 1.45,
            sitting_offset_max: 0.12,
            sitting_offset_cap: 35.0,
            standing_offset_min: 0.15,
            standing_offset_span: 0.10,
            standing_offset_cap: 30.0,
            sitting_drop_min: 0.08,
            sitting_drop_span: 0.16,
            standing_drop_max: 0.05,
            height_cap: 20.0,
            unset_baseline_points: 10.0,
            sitting_knee_min: 50.0,
            sitting_knee_max: 140.0,
            sitting_knee_center: 95.0,
            standing_knee_min: 150.0,
            standing_knee_full: 170.0,
            knee_cap: 15.0,
            alignment_max_deviation: 0.10,
            standing_extent_min: 0.5,
            alignment_points: 10.0,
            sitting_threshold: 35.0,
            standing_threshold: 55.0,
        }
    }
}

/// Hysteresis parameters for the posture stabilizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    pub window: usize,
    /// Majority share needed for the first confirmation
    pub initial_majority: f32,
    /// Majority share needed to challenge a confirmed state
    pub switch_majority: f32,
    /// Consecutive qualifying calls before the confirmed state flips
    pub switch_frames: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window: 30,
            initial_majority: 0.5,
            switch_majority: 0.8,
            switch_frames: 10,
        }
    }
}

/// Pushing-off detection constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSupportConfig {
    pub wrist_history: usize,
    /// Standing confidence that opens a transition window while still seated
    pub transition_standing_confidence: f32,
    pub min_trajectory_samples: usize,
    /// Tolerance either side of the hip-knee band
    pub knee_band_tolerance: f32,

    pub rise_min_shoulder: f32,
    /// Wrist rise must stay below this fraction of the shoulder rise
    pub rise_max_wrist_fraction: f32,
    pub press_min_drop: f32,
    pub elbow_min_extension: f32,
    pub elbow_min_shoulder_rise: f32,
    pub dwell_window: usize,
    pub dwell_min_in_band: usize,
    pub dwell_min_shoulder_rise: f32,
}

impl Default for HandSupportConfig {
    fn default() -> Self {
        Self {
            wrist_history: 30,
            transition_standing_confidence: 30.0,
            min_trajectory_samples: 5,
            knee_band_tolerance: 0.1,
            rise_min_shoulder: 0.05,
            rise_max_wrist_fraction: 0.4,
            press_min_drop: 0.015,
            elbow_min_extension: 12.0,
            elbow_min_shoulder_rise: 0.03,
            dwell_window: 8,
            dwell_min_in_band: 6,
            dwell_min_shoulder_rise: 0.06,
        }
    }
}

/// Sit-to-stand scoring and report constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub history_capacity: usize,
    pub min_history: usize,
    /// Standing share separating a stable rise from a brief one
    pub stable_standing_ratio: f32,
    /// A category counts as detected only above this many frames
    pub detection_min_frames: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            history_capacity: 150,
            min_history: 5,
            stable_standing_ratio: 0.2,
            detection_min_frames: 5,
        }
    }
}

/// Standing-stability (quiet standing) constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    pub history_capacity: usize,
    /// Records needed before a stability score is meaningful
    pub min_history: usize,
    pub sway_window: usize,
    pub stable_sway: f32,
    pub lost_balance_sway: f32,
    /// Lateral wrist reach, in shoulder widths from the body center
    pub reach_ratio: f32,
    pub hold_window: usize,
    pub hold_min_frames: usize,
    pub safe_duration_ms: f64,
    pub minimum_duration_ms: f64,
    pub max_sway_fraction: f32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            history_capacity: 4096,
            min_history: 5,
            sway_window: 30,
            stable_sway: 0.15,
            lost_balance_sway: 0.35,
            reach_ratio: 1.2,
            hold_window: 8,
            hold_min_frames: 6,
            safe_duration_ms: 120_000.0,
            minimum_duration_ms: 30_000.0,
            max_sway_fraction: 0.2,
        }
    }
}
