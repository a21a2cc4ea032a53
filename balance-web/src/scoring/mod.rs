//! Scoring module - clinical sub-scores from completed trial histories
//!
//! Re-exports only, plus the shared result record.

mod report;
mod sit_to_stand;
mod standing;

use serde::{Deserialize, Serialize};

pub use report::{generate_report, Detections, FrameCounts, SitToStandReport};
pub use sit_to_stand::{calculate_sit_to_stand_score, SitToStandDetails, SitToStandRule};
pub use standing::{
    calculate_standing_score, generate_stability_report, StabilityCounts, StabilityDetails,
    StabilityReport, StabilityRule,
};

/// A 0-4 item score with its rationale; immutable once produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult<D> {
    pub score: u8,
    pub reason: String,
    pub details: D,
}
