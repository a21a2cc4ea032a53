//! Standing-unsupported scorer (Berg item 2)
//!
//! Same shape as the sit-to-stand scorer: accumulate evidence in one pass,
//! then walk an ordered rubric. Time is measured in unsupported standing
//! bouts; a heavy hold or a loss of balance ends the current bout.

use serde::{Deserialize, Serialize};

use crate::config::StabilityConfig;
use crate::hands::HandSupport;
use crate::posture::PostureState;
use crate::session::StabilityRecord;
use crate::stability::SwayLevel;
use super::ScoreResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityRule {
    InsufficientData,
    NeverStood,
    StoodSafely,
    StoodWithSupervision,
    StoodThirtySeconds,
    SeveralTries,
    UnableUnsupported,
}

impl StabilityRule {
    pub fn score(&self) -> u8 {
        match self {
            StabilityRule::InsufficientData => 0,
            StabilityRule::NeverStood => 0,
            StabilityRule::StoodSafely => 4,
            StabilityRule::StoodWithSupervision => 3,
            StabilityRule::StoodThirtySeconds => 2,
            StabilityRule::SeveralTries => 1,
            StabilityRule::UnableUnsupported => 0,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            StabilityRule::InsufficientData => "insufficient data: too few analyzed frames",
            StabilityRule::NeverStood => "never observed standing",
            StabilityRule::StoodSafely => "stood safely for 2 minutes",
            StabilityRule::StoodWithSupervision => "stood 2 minutes with sway or support",
            StabilityRule::StoodThirtySeconds => "stood 30 seconds unsupported",
            StabilityRule::SeveralTries => "needed several tries to stand 30 seconds",
            StabilityRule::UnableUnsupported => "unable to stand 30 seconds unassisted",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityDetails {
    pub frame_count: usize,
    pub standing_frames: usize,
    pub saw_standing: bool,
    pub lost_balance: bool,
    pub used_support_heavy: bool,
    pub used_support_light: bool,
    /// Standing frames with visible sway, as a fraction of all standing frames
    pub sway_fraction: f32,
    pub max_sway: f32,
    pub bout_count: usize,
    pub longest_bout_ms: f64,
    pub total_bout_ms: f64,
    pub rule: Option<StabilityRule>,
}

impl StabilityDetails {
    pub fn accumulate(history: &[StabilityRecord]) -> Self {
        let mut details = Self {
            frame_count: history.len(),
            ..Default::default()
        };
        let mut swaying_frames = 0usize;
        let mut bout_start: Option<f64> = None;
        let mut last_in_bout = 0.0;

        for record in history {
            if record.state == PostureState::Standing {
                details.saw_standing = true;
                details.standing_frames += 1;
                if matches!(record.sway.level, SwayLevel::Swaying | SwayLevel::LostBalance) {
                    swaying_frames += 1;
                }
            }
            if record.sway.level == SwayLevel::LostBalance {
                details.lost_balance = true;
            }
            match record.support {
                HandSupport::HeavySupport => details.used_support_heavy = true,
                HandSupport::LightSupport => details.used_support_light = true,
                _ => {}
            }
            if let Some(amplitude) = record.sway.amplitude {
                details.max_sway = details.max_sway.max(amplitude);
            }

            if record.is_unsupported_standing() {
                if bout_start.is_none() {
                    bout_start = Some(record.timestamp);
                }
                last_in_bout = record.timestamp;
            } else if let Some(start) = bout_start.take() {
                details.close_bout(last_in_bout - start);
            }
        }
        if let Some(start) = bout_start {
            details.close_bout(last_in_bout - start);
        }

        if details.standing_frames > 0 {
            details.sway_fraction = swaying_frames as f32 / details.standing_frames as f32;
        }
        details
    }

    fn close_bout(&mut self, duration_ms: f64) {
        self.bout_count += 1;
        self.total_bout_ms += duration_ms;
        self.longest_bout_ms = self.longest_bout_ms.max(duration_ms);
    }

    pub fn rule(&self, config: &StabilityConfig) -> StabilityRule {
        if self.frame_count < config.min_history {
            StabilityRule::InsufficientData
        } else if !self.saw_standing {
            StabilityRule::NeverStood
        } else if self.longest_bout_ms >= config.safe_duration_ms
            && !self.lost_balance
            && !self.used_support_heavy
            && self.sway_fraction <= config.max_sway_fraction
        {
            StabilityRule::StoodSafely
        } else if self.longest_bout_ms >= config.safe_duration_ms {
            StabilityRule::StoodWithSupervision
        } else if self.longest_bout_ms >= config.minimum_duration_ms {
            StabilityRule::StoodThirtySeconds
        } else if self.bout_count >= 2 && self.total_bout_ms >= config.minimum_duration_ms {
            StabilityRule::SeveralTries
        } else {
            StabilityRule::UnableUnsupported
        }
    }
}

pub fn calculate_standing_score(
    history: &[StabilityRecord],
    config: &StabilityConfig,
) -> ScoreResult<StabilityDetails> {
    let mut details = StabilityDetails::accumulate(history);
    let rule = details.rule(config);
    details.rule = Some(rule);

    log::info!(
        "standing score {} ({:?}): longest bout {:.1}s over {} bout(s)",
        rule.score(), rule, details.longest_bout_ms / 1000.0, details.bout_count
    );

    ScoreResult {
        score: rule.score(),
        reason: rule.reason().to_string(),
        details,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityCounts {
    pub total: usize,
    pub standing: usize,
    pub swaying: usize,
    pub lost_balance: usize,
    pub heavy_support: usize,
    pub light_support: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityReport {
    pub result: ScoreResult<StabilityDetails>,
    pub counts: StabilityCounts,
    pub longest_bout_ms: f64,
    pub total_standing_ms: f64,
    pub max_sway: f32,
    pub duration_ms: f64,
}

pub fn generate_stability_report(history: &[StabilityRecord], config: &StabilityConfig) -> StabilityReport {
    let result = calculate_standing_score(history, config);

    let mut counts = StabilityCounts { total: history.len(), ..Default::default() };
    for record in history {
        if record.state == PostureState::Standing {
            counts.standing += 1;
        }
        match record.sway.level {
            SwayLevel::Swaying => counts.swaying += 1,
            SwayLevel::LostBalance => counts.lost_balance += 1,
            _ => {}
        }
        match record.support {
            HandSupport::HeavySupport => counts.heavy_support += 1,
            HandSupport::LightSupport => counts.light_support += 1,
            _ => {}
        }
    }

    let duration_ms = match (history.first(), history.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => 0.0,
    };

    StabilityReport {
        longest_bout_ms: result.details.longest_bout_ms,
        total_standing_ms: result.details.total_bout_ms,
        max_sway: result.details.max_sway,
        result,
        counts,
        duration_ms,
    }
}
