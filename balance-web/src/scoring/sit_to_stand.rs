//! Sit-to-stand scorer (Berg item 1)
//!
//! A literal decision list: rules are tried in order and the first match
//! wins. Any hand use caps the score below 4 no matter how stable the
//! standing looked afterwards.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::hands::{HandPosition, HandSupport};
use crate::posture::PostureState;
use crate::session::AnalysisRecord;
use super::ScoreResult;

/// The rubric, in precedence order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SitToStandRule {
    InsufficientData,
    MotionIncomplete,
    PushedOffKnees,
    HandRestedOnKnee,
    CleanStableRise,
    CleanBriefStanding,
    MinorDifficulty,
}

impl SitToStandRule {
    pub fn score(&self) -> u8 {
        match self {
            SitToStandRule::InsufficientData => 0,
            SitToStandRule::MotionIncomplete => 0,
            SitToStandRule::PushedOffKnees => 2,
            SitToStandRule::HandRestedOnKnee => 3,
            SitToStandRule::CleanStableRise => 4,
            SitToStandRule::CleanBriefStanding => 3,
            SitToStandRule::MinorDifficulty => 3,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            SitToStandRule::InsufficientData => "insufficient data: too few analyzed frames",
            SitToStandRule::MotionIncomplete => "motion incomplete: sitting and standing were not both observed",
            SitToStandRule::PushedOffKnees => "pushed off knees with the hands to stand",
            SitToStandRule::HandRestedOnKnee => "hand rested on knee, no push",
            SitToStandRule::CleanStableRise => "clean, stable rise without using the hands",
            SitToStandRule::CleanBriefStanding => "clean rise but brief/unstable standing",
            SitToStandRule::MinorDifficulty => "minor difficulty rising",
        }
    }
}

/// Evidence accumulated over one trial
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitToStandDetails {
    pub frame_count: usize,
    pub saw_sitting: bool,
    pub saw_standing: bool,
    pub used_hands_heavy: bool,
    pub used_hands_light: bool,
    pub hands_down_during_transition: bool,
    pub transition_count: usize,
    pub standing_ratio: f32,
    pub rule: Option<SitToStandRule>,
}

impl SitToStandDetails {
    /// Single pass over the history
    pub fn accumulate(history: &[AnalysisRecord]) -> Self {
        let mut details = Self {
            frame_count: history.len(),
            ..Default::default()
        };
        let mut standing_frames = 0usize;
        let mut previous: Option<PostureState> = None;

        for record in history {
            match record.state {
                PostureState::Sitting => details.saw_sitting = true,
                PostureState::Standing => {
                    details.saw_standing = true;
                    standing_frames += 1;
                }
                PostureState::Unknown => {}
            }
            match record.support() {
                HandSupport::HeavySupport => details.used_hands_heavy = true,
                HandSupport::LightSupport => details.used_hands_light = true,
                _ => {}
            }
            if record.is_transitioning && record.position() == HandPosition::HandsUp {
                details.hands_down_during_transition = true;
            }
            if previous == Some(PostureState::Sitting) && record.state == PostureState::Standing {
                details.transition_count += 1;
            }
            previous = Some(record.state);
        }

        if !history.is_empty() {
            details.standing_ratio = standing_frames as f32 / history.len() as f32;
        }
        details
    }

    /// Walk the rubric top to bottom
    pub fn rule(&self, config: &ScoringConfig) -> SitToStandRule {
        if self.frame_count < config.min_history {
            SitToStandRule::InsufficientData
        } else if !self.saw_sitting || !self.saw_standing {
            SitToStandRule::MotionIncomplete
        } else if self.used_hands_heavy {
            SitToStandRule::PushedOffKnees
        } else if self.used_hands_light && !self.hands_down_during_transition {
            SitToStandRule::HandRestedOnKnee
        } else if self.transition_count >= 1
            && (self.hands_down_during_transition || (!self.used_hands_heavy && !self.used_hands_light))
        {
            if self.standing_ratio > config.stable_standing_ratio {
                SitToStandRule::CleanStableRise
            } else {
                SitToStandRule::CleanBriefStanding
            }
        } else {
            SitToStandRule::MinorDifficulty
        }
    }
}

/// Score a completed trial from its analysis history
pub fn calculate_sit_to_stand_score(
    history: &[AnalysisRecord],
    config: &ScoringConfig,
) -> ScoreResult<SitToStandDetails> {
    let mut details = SitToStandDetails::accumulate(history);
    let rule = details.rule(config);
    details.rule = Some(rule);

    log::info!(
        "sit-to-stand score {} ({:?}) over {} frames, {} transition(s)",
        rule.score(), rule, details.frame_count, details.transition_count
    );

    ScoreResult {
        score: rule.score(),
        reason: rule.reason().to_string(),
        details,
    }
}
