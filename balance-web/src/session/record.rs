//! Per-frame analysis output

use serde::{Deserialize, Serialize};

use crate::hands::{HandPosition, HandReading, HandSupport};
use crate::overlay::to_css;
use crate::posture::{PostureResult, PostureState};
use crate::stability::{SwayLevel, SwayReading};

/// Everything the pipeline concluded about one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Stabilized posture (provisional raw state until one is confirmed)
    pub state: PostureState,
    pub sitting: PostureResult,
    pub standing: PostureResult,
    pub hand: HandReading,
    pub is_transitioning: bool,
    /// Milliseconds
    pub timestamp: f64,
    /// Suggested skeleton RGBA for the renderer
    pub color: [f32; 4],
}

impl AnalysisRecord {
    pub fn position(&self) -> HandPosition {
        self.hand.position
    }

    pub fn support(&self) -> HandSupport {
        self.hand.support
    }

    pub fn css_color(&self) -> String {
        to_css(self.color)
    }

    /// One-line status for an HTML overlay
    pub fn status_line(&self) -> String {
        format!(
            "{} | sit {:.0} / stand {:.0} | {}{}",
            self.state.name(),
            self.sitting.confidence,
            self.standing.confidence,
            self.hand.message,
            if self.is_transitioning { " | rising" } else { "" },
        )
    }
}

/// One frame of a quiet-standing trial
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityRecord {
    pub state: PostureState,
    pub standing: PostureResult,
    pub sway: SwayReading,
    pub support: HandSupport,
    pub timestamp: f64,
    pub color: [f32; 4],
}

impl StabilityRecord {
    /// Standing on its own: upright, not holding on, not falling
    pub fn is_unsupported_standing(&self) -> bool {
        self.state == PostureState::Standing
            && self.support != HandSupport::HeavySupport
            && self.sway.level != SwayLevel::LostBalance
    }

    pub fn css_color(&self) -> String {
        to_css(self.color)
    }

    pub fn status_line(&self) -> String {
        let sway = match self.sway.amplitude {
            Some(a) => format!("sway {:.2}", a),
            None => "sway --".to_string(),
        };
        format!("{} | stand {:.0} | {} | {}", self.state.name(), self.standing.confidence, sway, self.support.name())
    }
}
