//! Trial report - score plus frame tallies for the results screen

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::hands::{HandPosition, HandSupport};
use crate::posture::PostureState;
use crate::session::AnalysisRecord;
use super::sit_to_stand::{calculate_sit_to_stand_score, SitToStandDetails};
use super::ScoreResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameCounts {
    pub total: usize,
    pub sitting: usize,
    pub standing: usize,
    pub heavy_support: usize,
    pub light_support: usize,
    pub hands_down: usize,
}

/// Categories seen in more than the minimum number of frames
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detections {
    pub sitting: bool,
    pub standing: bool,
    pub heavy_support: bool,
    pub light_support: bool,
    pub hands_down: bool,
}

/// Read-only summary of a completed sit-to-stand trial
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitToStandReport {
    pub result: ScoreResult<SitToStandDetails>,
    pub counts: FrameCounts,
    pub detected: Detections,
    pub max_sitting_confidence: f32,
    pub max_standing_confidence: f32,
    /// Last minus first timestamp, milliseconds
    pub duration_ms: f64,
}

pub fn generate_report(history: &[AnalysisRecord], config: &ScoringConfig) -> SitToStandReport {
    let result = calculate_sit_to_stand_score(history, config);

    let mut counts = FrameCounts { total: history.len(), ..Default::default() };
    let mut max_sitting_confidence: f32 = 0.0;
    let mut max_standing_confidence: f32 = 0.0;

    for record in history {
        match record.state {
            PostureState::Sitting => counts.sitting += 1,
            PostureState::Standing => counts.standing += 1,
            PostureState::Unknown => {}
        }
        match record.support() {
            HandSupport::HeavySupport => counts.heavy_support += 1,
            HandSupport::LightSupport => counts.light_support += 1,
            _ => {}
        }
        if record.position() == HandPosition::HandsUp {
            counts.hands_down += 1;
        }
        max_sitting_confidence = max_sitting_confidence.max(record.sitting.confidence);
        max_standing_confidence = max_standing_confidence.max(record.standing.confidence);
    }

    let min = config.detection_min_frames;
    let detected = Detections {
        sitting: counts.sitting > min,
        standing: counts.standing > min,
        heavy_support: counts.heavy_support > min,
        light_support: counts.light_support > min,
        hands_down: counts.hands_down > min,
    };

    let duration_ms = match (history.first(), history.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => 0.0,
    };

    SitToStandReport {
        result,
        counts,
        detected,
        max_sitting_confidence,
        max_standing_confidence,
        duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::sit_to_stand::tests::sit_then_stand;

    #[test]
    fn tallies_and_duration() {
        let mut history = sit_then_stand(10, 10);
        history[3].sitting.confidence = 72.0;
        history[15].standing.confidence = 81.0;
        for record in history.iter_mut().skip(12).take(4) {
            record.hand.support = HandSupport::HeavySupport;
        }

        let report = generate_report(&history, &ScoringConfig::default());
        assert_eq!(report.result.score, 2);
        assert_eq!(report.counts.sitting, 10);
        assert_eq!(report.counts.standing, 10);
        assert_eq!(report.counts.heavy_support, 4);
        assert_eq!(report.max_sitting_confidence, 72.0);
        assert_eq!(report.max_standing_confidence, 81.0);
        assert_eq!(report.duration_ms, 1900.0);
    }

    #[test]
    fn detection_needs_more_than_five_frames() {
        let mut history = sit_then_stand(10, 10);
        for record in history.iter_mut().skip(10).take(5) {
            record.hand.support = HandSupport::HeavySupport;
        }
        let report = generate_report(&history, &ScoringConfig::default());
        assert!(report.detected.sitting);
        assert!(report.detected.standing);
        assert!(!report.detected.heavy_support);
    }

    #[test]
    fn empty_history_report() {
        let report = generate_report(&[], &ScoringConfig::default());
        assert_eq!(report.result.score, 0);
        assert_eq!(report.duration_ms, 0.0);
        assert_eq!(report.counts, FrameCounts::default());
    }
}
