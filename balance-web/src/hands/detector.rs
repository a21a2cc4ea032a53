//! Hand-support detector - pushing off the knees during sit-to-stand
//!
//! Tracks the wrist against the torso through the rise. Heavy support is
//! only ever declared from trajectory evidence gathered inside a
//! transition window, and once declared it stays latched for the trial.

use crate::config::HandSupportConfig;
use crate::pose::{mean, Frame};
use crate::posture::{PostureState, RingBuffer};
use super::trajectory::WristSample;
use super::types::{HandDebug, HandPosition, HandReading, HandSupport, PushSignal, SupportRule};

/// Posture context the detector needs from the rest of the pipeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionContext {
    /// Confirmed state before this frame
    pub previous: PostureState,
    /// Confirmed (stabilized) state after this frame
    pub confirmed: PostureState,
    pub standing_confidence: f32,
}

impl TransitionContext {
    /// Leaving a confirmed seat and reaching, or approaching, standing
    pub fn is_transition(&self, config: &HandSupportConfig) -> bool {
        self.previous == PostureState::Sitting
            && (self.confirmed == PostureState::Standing
                || self.standing_confidence > config.transition_standing_confidence)
    }
}

/// Landmark heights captured when the transition window opened
#[derive(Clone, Copy, Debug, PartialEq)]
struct TransitionStart {
    wrist_y: f32,
    shoulder_y: f32,
}

pub struct HandSupportDetector {
    config: HandSupportConfig,
    min_visibility: f32,
    wrist_history: RingBuffer<WristSample>,
    trajectory: RingBuffer<WristSample>,
    start: Option<TransitionStart>,
    hand_on_knee_during_transition: bool,
    hands_released_during_transition: bool,
    pushed_during_transition: bool,
}

impl HandSupportDetector {
    pub fn new(config: &HandSupportConfig, min_visibility: f32) -> Self {
        Self {
            config: config.clone(),
            min_visibility,
            wrist_history: RingBuffer::new(config.wrist_history),
            trajectory: RingBuffer::new(config.wrist_history),
            start: None,
            hand_on_knee_during_transition: false,
            hands_released_during_transition: false,
            pushed_during_transition: false,
        }
    }

    /// Classify the hands for one frame and update transition evidence
    pub fn detect(&mut self, frame: &Frame, ctx: TransitionContext, timestamp: f64) -> HandReading {
        let Some(sample) = WristSample::from_frame(frame, timestamp, self.min_visibility) else {
            let mut reading = HandReading::default();
            if ctx.confirmed == PostureState::Standing {
                let rule = self.support_rule();
                reading.support = rule.support();
                reading.message = rule.message().to_string();
            }
            reading.debug.pushed_during_transition = self.pushed_during_transition;
            return reading;
        };
        self.wrist_history.push(sample);

        let tolerance = self.config.knee_band_tolerance;
        let in_band = sample.in_knee_band(tolerance);
        let in_transition = ctx.is_transition(&self.config);

        if in_transition && self.start.is_none() {
            log::info!(
                "transition window opened: wrist={:.3} shoulder={:.3}",
                sample.wrist_y, sample.shoulder_y
            );
            self.start = Some(TransitionStart {
                wrist_y: sample.wrist_y,
                shoulder_y: sample.shoulder_y,
            });
            self.trajectory.clear();
            self.hand_on_knee_during_transition = false;
            self.hands_released_during_transition = false;
        }

        let mut push_signal = None;
        if in_transition {
            self.trajectory.push(sample);
            if in_band {
                self.hand_on_knee_during_transition = true;
            } else {
                self.hands_released_during_transition = true;
            }

            if self.trajectory.len() >= self.config.min_trajectory_samples {
                push_signal = self.push_signal(&sample);
            }
            if let Some(signal) = push_signal {
                if !self.pushed_during_transition {
                    log::info!("pushing detected ({:?})", signal);
                }
                self.pushed_during_transition = true;
            }
        }

        let position = if push_signal.is_some() {
            HandPosition::HandsPushing
        } else if in_band {
            HandPosition::HandsOnKnee
        } else {
            HandPosition::HandsUp
        };

        let (support, message) = if ctx.confirmed == PostureState::Standing {
            let rule = self.support_rule();
            (rule.support(), rule.message().to_string())
        } else {
            (HandSupport::Unknown, position_message(position).to_string())
        };

        let (shoulder_rise, wrist_rise) = match self.start {
            Some(start) => (
                Some(start.shoulder_y - sample.shoulder_y),
                Some(start.wrist_y - sample.wrist_y),
            ),
            None => (None, None),
        };

        HandReading {
            position,
            support,
            message,
            debug: HandDebug {
                wrist_y: Some(sample.wrist_y),
                shoulder_rise,
                wrist_rise,
                trajectory_len: self.trajectory.len(),
                in_knee_band: in_band,
                push_signal,
                pushed_during_transition: self.pushed_during_transition,
            },
        }
    }

    fn support_rule(&self) -> SupportRule {
        SupportRule::resolve(
            self.pushed_during_transition,
            self.hand_on_knee_during_transition,
            self.hands_released_during_transition,
        )
    }

    /// First pushing signature that holds for the current sample
    fn push_signal(&self, current: &WristSample) -> Option<PushSignal> {
        let start = self.start?;
        let c = &self.config;
        let in_band = current.in_knee_band(c.knee_band_tolerance);
        let shoulder_rise = start.shoulder_y - current.shoulder_y;
        let wrist_rise = start.wrist_y - current.wrist_y;

        if in_band
            && shoulder_rise >= c.rise_min_shoulder
            && wrist_rise < c.rise_max_wrist_fraction * shoulder_rise
        {
            return Some(PushSignal::RiseRatio);
        }

        let k = (self.trajectory.len() / 3).max(3);
        let early_wrist = mean(self.trajectory.earliest(k).map(|s| s.wrist_y));
        let recent_wrist = mean(self.trajectory.recent(k).map(|s| s.wrist_y));
        if let (Some(early), Some(recent)) = (early_wrist, recent_wrist) {
            // y grows downward, so a press shows as a larger recent y
            if in_band && recent - early >= c.press_min_drop {
                return Some(PushSignal::DownwardPress);
            }
        }

        let early_elbow = mean(self.trajectory.earliest(k).filter_map(|s| s.elbow_angle));
        let recent_elbow = mean(self.trajectory.recent(k).filter_map(|s| s.elbow_angle));
        if let (Some(early), Some(recent)) = (early_elbow, recent_elbow) {
            if in_band
                && recent - early >= c.elbow_min_extension
                && shoulder_rise >= c.elbow_min_shoulder_rise
            {
                return Some(PushSignal::ElbowExtension);
            }
        }

        if self.trajectory.len() >= c.dwell_window && shoulder_rise >= c.dwell_min_shoulder_rise {
            let dwelling = self
                .trajectory
                .recent(c.dwell_window)
                .filter(|s| s.in_knee_band(c.knee_band_tolerance))
                .count();
            if dwelling >= c.dwell_min_in_band {
                return Some(PushSignal::Dwell);
            }
        }

        None
    }

    pub fn pushed_during_transition(&self) -> bool {
        self.pushed_during_transition
    }

    pub fn transition_started(&self) -> bool {
        self.start.is_some()
    }

    pub fn wrist_history(&self) -> &RingBuffer<WristSample> {
        &self.wrist_history
    }

    pub fn reset(&mut self) {
        self.wrist_history.clear();
        self.trajectory.clear();
        self.start = None;
        self.hand_on_knee_during_transition = false;
        self.hands_released_during_transition = false;
        self.pushed_during_transition = false;
    }
}

fn position_message(position: HandPosition) -> &'static str {
    match position {
        HandPosition::HandsPushing => "Pushing off the knees",
        HandPosition::HandsOnKnee => "Hands on the knees",
        HandPosition::HandsUp => "Hands free",
        HandPosition::Unknown => "Hands not visible",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_WRIST};
    use crate::posture::testing::FrameBuilder;
    use PostureState::{Sitting, Standing};

    const RISING: TransitionContext = TransitionContext {
        previous: Sitting,
        confirmed: Sitting,
        standing_confidence: 45.0,
    };
    const SEATED: TransitionContext = TransitionContext {
        previous: Sitting,
        confirmed: Sitting,
        standing_confidence: 10.0,
    };
    const STOOD: TransitionContext = TransitionContext {
        previous: Standing,
        confirmed: Standing,
        standing_confidence: 80.0,
    };

    fn detector() -> HandSupportDetector {
        HandSupportDetector::new(&HandSupportConfig::default(), 0.3)
    }

    /// Seated frame with the shoulders raised by `rise` and wrists at `wrist_y`
    fn rising_frame(rise: f32, wrist_y: f32) -> Frame {
        FrameBuilder::seated()
            .pair(LEFT_SHOULDER, RIGHT_SHOULDER, 0.45, 0.45 - rise)
            .pair(LEFT_ELBOW, RIGHT_ELBOW, 0.55, 0.58 - rise / 2.0)
            .pair(LEFT_WRIST, RIGHT_WRIST, 0.62, wrist_y)
            .build()
    }

    #[test]
    fn anchored_wrist_during_rise_is_pushing() {
        let mut d = detector();
        let mut last = HandReading::default();
        for i in 0..8 {
            last = d.detect(&rising_frame(i as f32 * 0.02, 0.68), RISING, i as f64 * 33.0);
        }
        assert_eq!(last.position, HandPosition::HandsPushing);
        assert!(d.pushed_during_transition());

        let stood = d.detect(&rising_frame(0.3, 0.5), STOOD, 400.0);
        assert_eq!(stood.support, HandSupport::HeavySupport);
        assert_eq!(stood.message, SupportRule::PushedOffKnees.message());
    }

    #[test]
    fn push_latch_survives_later_frames() {
        let mut d = detector();
        for i in 0..8 {
            d.detect(&rising_frame(i as f32 * 0.02, 0.68), RISING, i as f64);
        }
        assert!(d.pushed_during_transition());
        for i in 0..50 {
            let reading = d.detect(&FrameBuilder::standing().build(), STOOD, 100.0 + i as f64);
            assert_eq!(reading.support, HandSupport::HeavySupport);
        }
        assert!(d.pushed_during_transition());
        d.reset();
        assert!(!d.pushed_during_transition());
        assert!(!d.transition_started());
    }

    #[test]
    fn wrist_rising_with_torso_is_not_pushing() {
        let mut d = detector();
        for i in 0..8 {
            let rise = i as f32 * 0.02;
            d.detect(&rising_frame(rise, 0.52 - rise), RISING, i as f64);
        }
        assert!(!d.pushed_during_transition());
        let stood = d.detect(&FrameBuilder::standing().build(), STOOD, 100.0);
        assert_eq!(stood.support, HandSupport::NoSupport);
    }

    #[test]
    fn resting_hand_without_push_is_light_support() {
        let mut d = detector();
        // Window opens; too few samples for any pushing test
        for i in 0..4 {
            let reading = d.detect(&rising_frame(0.0, 0.68), RISING, i as f64);
            assert_eq!(reading.position, HandPosition::HandsOnKnee);
            assert_eq!(reading.support, HandSupport::Unknown);
        }
        let stood = d.detect(&rising_frame(0.0, 0.68), STOOD, 10.0);
        assert_eq!(stood.support, HandSupport::LightSupport);
    }

    #[test]
    fn no_window_no_evidence() {
        let mut d = detector();
        for i in 0..10 {
            d.detect(&rising_frame(i as f32 * 0.02, 0.68), SEATED, i as f64);
        }
        assert!(!d.transition_started());
        assert!(!d.pushed_during_transition());
        assert_eq!(d.wrist_history().len(), 10);
    }

    /// Seated frame with vertical arms: shoulder raised by `rise`, elbow
    /// pushed out sideways by `bend`, wrist at `wrist_y`
    fn arm_frame(rise: f32, bend: f32, wrist_y: f32) -> Frame {
        let shoulder_y = 0.45 - rise;
        FrameBuilder::seated()
            .pair(LEFT_SHOULDER, RIGHT_SHOULDER, 0.45, shoulder_y)
            .pair(LEFT_ELBOW, RIGHT_ELBOW, 0.45 + bend, (shoulder_y + wrist_y) / 2.0)
            .pair(LEFT_WRIST, RIGHT_WRIST, 0.45, wrist_y)
            .build()
    }

    fn first_signal(d: &mut HandSupportDetector, frames: &[Frame]) -> Option<(usize, PushSignal)> {
        frames.iter().enumerate().find_map(|(i, frame)| {
            d.detect(frame, RISING, i as f64 * 33.0).debug.push_signal.map(|s| (i, s))
        })
    }

    #[test]
    fn anchored_wrist_reports_rise_ratio_first() {
        let mut d = detector();
        let mut signals = Vec::new();
        for i in 0..8 {
            let reading = d.detect(&rising_frame(i as f32 * 0.02, 0.68), RISING, i as f64);
            signals.push(reading.debug.push_signal);
        }
        assert_eq!(signals[..4], [None, None, None, None]);
        assert_eq!(signals[4], Some(PushSignal::RiseRatio));
        // dwell also holds on the last frame; the rise-ratio test ranks first
        assert_eq!(signals[7], Some(PushSignal::RiseRatio));
    }

    #[test]
    fn straightening_arm_is_elbow_extension() {
        // shoulder rise stays under the rise-ratio and dwell minimums
        let frames: Vec<Frame> = (0..6)
            .map(|i| arm_frame(i as f32 * 0.008, 0.06 - i as f32 * 0.012, 0.68))
            .collect();
        let mut d = detector();
        assert_eq!(first_signal(&mut d, &frames), Some((4, PushSignal::ElbowExtension)));
        assert!(d.pushed_during_transition());
    }

    #[test]
    fn sustained_hold_in_band_is_dwell() {
        // wrist lifts at half the shoulder rate, so the rise-ratio test never holds
        let frames: Vec<Frame> = (0..8)
            .map(|i| arm_frame(i as f32 * 0.012, 0.0, 0.76 - i as f32 * 0.006))
            .collect();
        let mut d = detector();
        assert_eq!(first_signal(&mut d, &frames), Some((7, PushSignal::Dwell)));
    }

    #[test]
    fn downward_press_is_pushing() {
        let mut d = detector();
        let mut signal = None;
        for i in 0..6 {
            // torso barely moves, wrist sinks into the thigh
            let reading = d.detect(&rising_frame(0.0, 0.64 + i as f32 * 0.01), RISING, i as f64);
            signal = reading.debug.push_signal;
        }
        assert_eq!(signal, Some(PushSignal::DownwardPress));
    }

    #[test]
    fn invisible_hands_keep_latched_support() {
        let mut d = detector();
        for i in 0..8 {
            d.detect(&rising_frame(i as f32 * 0.02, 0.68), RISING, i as f64);
        }
        let frame = FrameBuilder::standing().hide(&[LEFT_WRIST, RIGHT_WRIST]).build();
        let reading = d.detect(&frame, STOOD, 50.0);
        assert_eq!(reading.position, HandPosition::Unknown);
        assert_eq!(reading.support, HandSupport::HeavySupport);
    }
}
