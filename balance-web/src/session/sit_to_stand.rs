//! Sit-to-stand trial session
//!
//! Owns every buffer the pipeline mutates. One session per camera view;
//! two views never share state.

use crate::config::AnalysisConfig;
use crate::hands::{HandSupportDetector, TransitionContext};
use crate::overlay::skeleton_color;
use crate::pose::Frame;
use crate::posture::{
    raw_posture, score_sitting, score_standing, HeightTracker, PostureMeasurements,
    PostureResult, PostureState, RingBuffer, StateStabilizer,
};
use crate::scoring::{generate_report, SitToStandReport};
use super::record::AnalysisRecord;

pub struct AnalysisSession {
    config: AnalysisConfig,
    heights: HeightTracker,
    stabilizer: StateStabilizer,
    hands: HandSupportDetector,
    history: RingBuffer<AnalysisRecord>,
    /// Confirmed posture after the last frame
    confirmed: PostureState,
    frames_skipped: u64,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            heights: HeightTracker::new(&config.classifier),
            stabilizer: StateStabilizer::new(&config.stabilizer),
            hands: HandSupportDetector::new(&config.hands, config.classifier.min_visibility),
            history: RingBuffer::new(config.scoring.history_capacity),
            confirmed: PostureState::Unknown,
            frames_skipped: 0,
            config,
        }
    }

    /// Clear every buffer and latch together
    pub fn reset(&mut self) {
        self.heights.reset();
        self.stabilizer.reset();
        self.hands.reset();
        self.history.clear();
        self.confirmed = PostureState::Unknown;
        self.frames_skipped = 0;
        log::info!("sit-to-stand session reset");
    }

    /// Replace the calibration and start a fresh trial with it
    pub fn reconfigure(&mut self, config: AnalysisConfig) {
        *self = Self::new(config);
    }

    /// Run the pipeline on one frame
    ///
    /// A frame the pose source could not detect is skipped: no record is
    /// produced and no buffer changes.
    pub fn feed(&mut self, frame: Option<&Frame>, timestamp: f64) -> Option<AnalysisRecord> {
        let Some(frame) = frame else {
            self.frames_skipped += 1;
            log::debug!("no landmarks at t={:.0}, frame skipped", timestamp);
            return None;
        };

        self.heights.observe(frame);
        let measurements = PostureMeasurements::measure(frame, self.heights.snapshot(), &self.config.classifier);
        let (sitting, standing) = match &measurements {
            Some(m) => (
                score_sitting(m, &self.config.classifier),
                score_standing(m, &self.config.classifier),
            ),
            None => (PostureResult::undetected(), PostureResult::undetected()),
        };

        let (raw, confidence) = raw_posture(&sitting, &standing);
        let state = self.stabilizer.observe(raw, confidence, timestamp);

        let previous = self.confirmed;
        self.confirmed = self.stabilizer.confirmed().unwrap_or(PostureState::Unknown);
        let ctx = TransitionContext {
            previous,
            confirmed: self.confirmed,
            standing_confidence: standing.confidence,
        };
        let hand = self.hands.detect(frame, ctx, timestamp);

        let record = AnalysisRecord {
            state,
            sitting,
            standing,
            is_transitioning: ctx.is_transition(&self.config.hands),
            timestamp,
            color: skeleton_color(state, hand.position),
            hand,
        };
        log::debug!("{}", record.status_line());

        self.history.push(record.clone());
        Some(record)
    }

    /// Score the trial recorded so far
    pub fn finalize(&self) -> SitToStandReport {
        finalize_history(&self.history.to_vec(), &self.config)
    }

    pub fn history(&self) -> &RingBuffer<AnalysisRecord> {
        &self.history
    }

    pub fn latest(&self) -> Option<&AnalysisRecord> {
        self.history.latest()
    }

    pub fn confirmed_state(&self) -> PostureState {
        self.confirmed
    }

    pub fn pushed_during_transition(&self) -> bool {
        self.hands.pushed_during_transition()
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Every buffer is empty (fresh trial)
    pub fn is_clear(&self) -> bool {
        self.history.is_empty()
            && self.heights.sample_count() == 0
            && self.stabilizer.window_len() == 0
            && self.hands.wrist_history().is_empty()
            && !self.hands.transition_started()
            && !self.hands.pushed_during_transition()
            && self.confirmed == PostureState::Unknown
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Score an arbitrary history with the given calibration
pub fn finalize_history(history: &[AnalysisRecord], config: &AnalysisConfig) -> SitToStandReport {
    generate_report(history, &config.scoring)
}
