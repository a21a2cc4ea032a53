//! Posture states and classifier output records

use serde::{Deserialize, Serialize};

/// Discrete posture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostureState {
    Sitting,
    Standing,
    #[default]
    Unknown,
}

impl PostureState {
    pub fn name(&self) -> &'static str {
        match self {
            PostureState::Sitting => "SITTING",
            PostureState::Standing => "STANDING",
            PostureState::Unknown => "UNKNOWN",
        }
    }
}

/// Points each signal contributed to one classifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalPoints {
    pub body_ratio: f32,
    pub hip_knee: f32,
    pub head_height: f32,
    pub knee_angle: f32,
    pub alignment: f32,
}

impl SignalPoints {
    pub fn total(&self) -> f32 {
        self.body_ratio + self.hip_knee + self.head_height + self.knee_angle + self.alignment
    }
}

/// Diagnostic breakdown of a classification
///
/// Measured values are `None` when their landmarks were not visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostureDetails {
    pub body_ratio: Option<f32>,
    pub hip_knee_offset: Option<f32>,
    pub height_drop: Option<f32>,
    pub baseline_set: bool,
    pub knee_angle: Option<f32>,
    pub alignment_deviation: Option<f32>,
    pub vertical_extent: Option<f32>,
    pub points: SignalPoints,
}

/// Output of `detect_sitting` / `detect_standing`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostureResult {
    pub detected: bool,
    /// 0-100
    pub confidence: f32,
    pub details: PostureDetails,
}

impl PostureResult {
    /// Result for a frame whose torso could not be seen
    pub fn undetected() -> Self {
        Self::default()
    }
}

/// Pick the raw per-frame posture from both classifiers
///
/// Returns the state and the confidence backing it.
pub fn raw_posture(sitting: &PostureResult, standing: &PostureResult) -> (PostureState, f32) {
    match (sitting.detected, standing.detected) {
        (true, true) if standing.confidence > sitting.confidence => {
            (PostureState::Standing, standing.confidence)
        }
        (true, _) => (PostureState::Sitting, sitting.confidence),
        (false, true) => (PostureState::Standing, standing.confidence),
        (false, false) => (PostureState::Unknown, sitting.confidence.max(standing.confidence)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(detected: bool, confidence: f32) -> PostureResult {
        PostureResult { detected, confidence, ..Default::default() }
    }

    #[test]
    fn higher_confidence_wins_when_both_detected() {
        assert_eq!(raw_posture(&result(true, 60.0), &result(true, 70.0)).0, PostureState::Standing);
        assert_eq!(raw_posture(&result(true, 70.0), &result(true, 70.0)).0, PostureState::Sitting);
    }

    #[test]
    fn neither_detected_is_unknown() {
        let (state, confidence) = raw_posture(&result(false, 20.0), &result(false, 40.0));
        assert_eq!(state, PostureState::Unknown);
        assert_eq!(confidence, 40.0);
    }

    #[test]
    fn serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&PostureState::Standing).unwrap(), "\"STANDING\"");
    }
}
