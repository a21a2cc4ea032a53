//! Reaching for external support while standing
//!
//! A wrist far out to the side of the body is a reach. A single reach is
//! light support; holding the reach across most of the recent window means
//! the subject is holding on to something.

use crate::config::StabilityConfig;
use crate::hands::HandSupport;
use crate::pose::{distance, Frame, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, RIGHT_HIP, RIGHT_SHOULDER, RIGHT_WRIST};
use crate::posture::RingBuffer;

pub struct ReachDetector {
    reaches: RingBuffer<bool>,
    reach_ratio: f32,
    hold_min_frames: usize,
    min_visibility: f32,
}

impl ReachDetector {
    pub fn new(config: &StabilityConfig, min_visibility: f32) -> Self {
        Self {
            reaches: RingBuffer::new(config.hold_window),
            reach_ratio: config.reach_ratio,
            hold_min_frames: config.hold_min_frames,
            min_visibility,
        }
    }

    pub fn observe(&mut self, frame: &Frame) -> HandSupport {
        let vis = self.min_visibility;
        let (Some(ls), Some(rs)) = (frame.visible(LEFT_SHOULDER, vis), frame.visible(RIGHT_SHOULDER, vis)) else {
            return HandSupport::Unknown;
        };
        let Some(hip) = frame.midpoint(LEFT_HIP, RIGHT_HIP, vis) else {
            return HandSupport::Unknown;
        };
        let wrists: Vec<_> = [LEFT_WRIST, RIGHT_WRIST]
            .iter()
            .filter_map(|&w| frame.visible(w, vis))
            .collect();
        if wrists.is_empty() {
            return HandSupport::Unknown;
        }

        let center_x = ((ls.x + rs.x) / 2.0 + hip.x) / 2.0;
        let limit = self.reach_ratio * distance(ls, rs);
        let reaching = wrists.iter().any(|w| (w.x - center_x).abs() > limit);
        self.reaches.push(reaching);

        let held = self.reaches.iter().filter(|&&r| r).count();
        if held >= self.hold_min_frames {
            HandSupport::HeavySupport
        } else if reaching {
            HandSupport::LightSupport
        } else {
            HandSupport::NoSupport
        }
    }

    pub fn len(&self) -> usize {
        self.reaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reaches.is_empty()
    }

    pub fn reset(&mut self) {
        self.reaches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posture::testing::FrameBuilder;

    fn reaching_frame() -> Frame {
        // Right wrist 0.2 out from center with a 0.1 shoulder width
        FrameBuilder::standing().point(RIGHT_WRIST, 0.7, 0.45).build()
    }

    fn detector() -> ReachDetector {
        ReachDetector::new(&StabilityConfig::default(), 0.3)
    }

    #[test]
    fn arms_in_is_no_support() {
        let mut d = detector();
        assert_eq!(d.observe(&FrameBuilder::standing().build()), HandSupport::NoSupport);
    }

    #[test]
    fn brief_reach_is_light_and_held_reach_is_heavy() {
        let mut d = detector();
        assert_eq!(d.observe(&reaching_frame()), HandSupport::LightSupport);
        for _ in 0..4 {
            d.observe(&reaching_frame());
        }
        assert_eq!(d.observe(&reaching_frame()), HandSupport::HeavySupport);
    }

    #[test]
    fn hidden_wrists_are_unknown() {
        let mut d = detector();
        let frame = FrameBuilder::standing().hide(&[LEFT_WRIST, RIGHT_WRIST]).build();
        assert_eq!(d.observe(&frame), HandSupport::Unknown);
    }
}
