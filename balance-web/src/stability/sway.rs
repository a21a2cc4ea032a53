//! Postural sway tracking
//!
//! Lateral excursion of the body center over a rolling window, normalized
//! by shoulder width so it does not depend on camera distance.

use serde::{Deserialize, Serialize};

use crate::config::StabilityConfig;
use crate::pose::{distance, Frame, LEFT_HIP, LEFT_SHOULDER, RIGHT_HIP, RIGHT_SHOULDER};
use crate::posture::RingBuffer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwayLevel {
    Stable,
    Swaying,
    LostBalance,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwayReading {
    /// Center-x range over the window, in shoulder widths
    pub amplitude: Option<f32>,
    pub level: SwayLevel,
}

#[derive(Clone, Copy, Debug)]
struct CenterSample {
    x: f32,
    shoulder_width: f32,
}

pub struct SwayTracker {
    history: RingBuffer<CenterSample>,
    stable_sway: f32,
    lost_balance_sway: f32,
    min_visibility: f32,
}

impl SwayTracker {
    pub fn new(config: &StabilityConfig, min_visibility: f32) -> Self {
        Self {
            history: RingBuffer::new(config.sway_window),
            stable_sway: config.stable_sway,
            lost_balance_sway: config.lost_balance_sway,
            min_visibility,
        }
    }

    pub fn observe(&mut self, frame: &Frame) -> SwayReading {
        let vis = self.min_visibility;
        let (Some(ls), Some(rs)) = (frame.visible(LEFT_SHOULDER, vis), frame.visible(RIGHT_SHOULDER, vis)) else {
            return SwayReading::default();
        };
        let Some(hip) = frame.midpoint(LEFT_HIP, RIGHT_HIP, vis) else {
            return SwayReading::default();
        };

        let shoulder_width = distance(ls, rs);
        if !shoulder_width.is_finite() || shoulder_width < 0.01 {
            return SwayReading::default();
        }
        let shoulder_x = (ls.x + rs.x) / 2.0;
        self.history.push(CenterSample {
            x: (shoulder_x + hip.x) / 2.0,
            shoulder_width,
        });
        self.reading()
    }

    fn reading(&self) -> SwayReading {
        if self.history.len() < 2 {
            return SwayReading { amplitude: Some(0.0), level: SwayLevel::Stable };
        }
        let max = self.history.iter().map(|s| s.x).fold(f32::NEG_INFINITY, f32::max);
        let min = self.history.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
        let width = self.history.iter().map(|s| s.shoulder_width).sum::<f32>() / self.history.len() as f32;

        let amplitude = (max - min) / width;
        let level = if amplitude < self.stable_sway {
            SwayLevel::Stable
        } else if amplitude < self.lost_balance_sway {
            SwayLevel::Swaying
        } else {
            SwayLevel::LostBalance
        };
        SwayReading { amplitude: Some(amplitude), level }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posture::testing::FrameBuilder;

    fn shifted(dx: f32) -> Frame {
        FrameBuilder::standing()
            .pair(LEFT_SHOULDER, RIGHT_SHOULDER, 0.5 + dx, 0.25)
            .pair(LEFT_HIP, RIGHT_HIP, 0.5 + dx, 0.50)
            .build()
    }

    fn tracker() -> SwayTracker {
        SwayTracker::new(&StabilityConfig::default(), 0.3)
    }

    #[test]
    fn still_body_is_stable() {
        let mut t = tracker();
        let mut reading = SwayReading::default();
        for _ in 0..10 {
            reading = t.observe(&shifted(0.0));
        }
        assert_eq!(reading.level, SwayLevel::Stable);
        assert_eq!(reading.amplitude, Some(0.0));
    }

    #[test]
    fn amplitude_grades_sway() {
        // shoulder width is 0.1, so a 0.02 excursion is 0.2 widths
        let mut t = tracker();
        t.observe(&shifted(0.0));
        assert_eq!(t.observe(&shifted(0.02)).level, SwayLevel::Swaying);
        assert_eq!(t.observe(&shifted(0.05)).level, SwayLevel::LostBalance);
    }

    #[test]
    fn corrupt_frame_does_not_poison_the_window() {
        let mut t = tracker();
        t.observe(&shifted(0.0));
        let corrupt = FrameBuilder::standing().point(LEFT_SHOULDER, f32::NAN, 0.25).build();
        assert_eq!(t.observe(&corrupt).level, SwayLevel::Unknown);
        assert_eq!(t.len(), 1);
        for _ in 0..5 {
            let reading = t.observe(&shifted(0.0));
            assert_eq!(reading.level, SwayLevel::Stable);
            assert_eq!(reading.amplitude, Some(0.0));
        }
    }

    #[test]
    fn hidden_shoulders_are_unknown() {
        let mut t = tracker();
        let frame = FrameBuilder::standing().hide(&[LEFT_SHOULDER, RIGHT_SHOULDER]).build();
        assert_eq!(t.observe(&frame).level, SwayLevel::Unknown);
    }
}
