//! Quiet-standing trial session
//!
//! Runs the same posture pipeline as the sit-to-stand session, then layers
//! sway and reach tracking on top. No hand-push logic; there is no rise.

use crate::config::AnalysisConfig;
use crate::overlay::stability_color;
use crate::pose::Frame;
use crate::posture::{
    raw_posture, score_sitting, score_standing, HeightTracker, PostureMeasurements,
    PostureResult, PostureState, RingBuffer, StateStabilizer,
};
use crate::scoring::{generate_stability_report, StabilityReport};
use crate::stability::{ReachDetector, SwayTracker};
use super::record::StabilityRecord;

pub struct StabilitySession {
    config: AnalysisConfig,
    heights: HeightTracker,
    stabilizer: StateStabilizer,
    sway: SwayTracker,
    reach: ReachDetector,
    history: RingBuffer<StabilityRecord>,
}

impl StabilitySession {
    pub fn new(config: AnalysisConfig) -> Self {
        let vis = config.classifier.min_visibility;
        Self {
            heights: HeightTracker::new(&config.classifier),
            stabilizer: StateStabilizer::new(&config.stabilizer),
            sway: SwayTracker::new(&config.stability, vis),
            reach: ReachDetector::new(&config.stability, vis),
            history: RingBuffer::new(config.stability.history_capacity),
            config,
        }
    }

    pub fn reset(&mut self) {
        self.heights.reset();
        self.stabilizer.reset();
        self.sway.reset();
        self.reach.reset();
        self.history.clear();
        log::info!("stability session reset");
    }

    pub fn reconfigure(&mut self, config: AnalysisConfig) {
        *self = Self::new(config);
    }

    pub fn feed(&mut self, frame: Option<&Frame>, timestamp: f64) -> Option<StabilityRecord> {
        let frame = frame?;

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

        let sway = self.sway.observe(frame);
        let support = self.reach.observe(frame);

        let record = StabilityRecord {
            state,
            standing,
            sway,
            support,
            timestamp,
            color: stability_color(state, sway.level, support),
        };
        log::debug!("{}", record.status_line());

        self.history.push(record.clone());
        Some(record)
    }

    pub fn finalize(&self) -> StabilityReport {
        generate_stability_report(&self.history.to_vec(), &self.config.stability)
    }

    pub fn history(&self) -> &RingBuffer<StabilityRecord> {
        &self.history
    }

    pub fn latest(&self) -> Option<&StabilityRecord> {
        self.history.latest()
    }

    pub fn confirmed_state(&self) -> PostureState {
        self.stabilizer.confirmed().unwrap_or(PostureState::Unknown)
    }

    pub fn is_clear(&self) -> bool {
        self.history.is_empty()
            && self.heights.sample_count() == 0
            && self.stabilizer.window_len() == 0
            && self.sway.is_empty()
            && self.reach.is_empty()
    }
}

impl Default for StabilitySession {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::HandSupport;
    use crate::pose::RIGHT_WRIST;
    use crate::posture::testing::{standing_frame, FrameBuilder};
    use crate::stability::SwayLevel;

    fn run(session: &mut StabilitySession, frame: &Frame, seconds: std::ops::Range<usize>) {
        for s in seconds {
            session.feed(Some(frame), s as f64 * 1000.0);
        }
    }

    #[test]
    fn quiet_standing_for_forty_seconds_scores_two() {
        let mut session = StabilitySession::default();
        run(&mut session, &standing_frame(), 0..41);

        let latest = session.latest().unwrap();
        assert_eq!(latest.state, PostureState::Standing);
        assert_eq!(latest.sway.level, SwayLevel::Stable);
        assert_eq!(latest.support, HandSupport::NoSupport);

        let report = session.finalize();
        assert_eq!(report.longest_bout_ms, 40_000.0);
        assert_eq!(report.result.score, 2);
    }

    #[test]
    fn holding_on_ends_the_bout() {
        let mut session = StabilitySession::default();
        run(&mut session, &standing_frame(), 0..20);
        let holding = FrameBuilder::standing().point(RIGHT_WRIST, 0.7, 0.45).build();
        run(&mut session, &holding, 20..60);

        assert_eq!(session.latest().unwrap().support, HandSupport::HeavySupport);
        let report = session.finalize();
        assert!(report.result.details.used_support_heavy);
        assert!(report.longest_bout_ms < 30_000.0);
        assert_eq!(report.result.score, 0);
    }

    #[test]
    fn missing_frames_are_skipped_and_reset_clears() {
        let mut session = StabilitySession::default();
        assert!(session.feed(None, 0.0).is_none());
        run(&mut session, &standing_frame(), 0..10);
        assert_eq!(session.history().len(), 10);
        assert_eq!(session.sway.len(), 10);
        assert_eq!(session.reach.len(), 10);
        assert!(!session.is_clear());
        session.reset();
        assert!(session.sway.is_empty());
        assert!(session.reach.is_empty());
        assert!(session.is_clear());
        assert_eq!(session.finalize().result.score, 0);
    }
}
