//! Geometric signals shared by both posture classifiers
//!
//! Extracted once per frame. Every signal is optional: a signal whose
//! landmarks are below the visibility threshold is simply absent and
//! contributes nothing downstream.

use crate::config::ClassifierConfig;
use crate::pose::{
    angle_at, mean, Frame, Point, TORSO,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
};
use super::height::HeightSnapshot;

/// Signals measured from one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PostureMeasurements {
    /// |hip.y − ankle.y| / |shoulder.y − hip.y|
    pub body_ratio: Option<f32>,
    /// knee.y − hip.y (positive = knee below hip)
    pub hip_knee_offset: Option<f32>,
    pub height: HeightSnapshot,
    /// Hip-knee-ankle angle in degrees, averaged over visible legs
    pub knee_angle: Option<f32>,
    /// Horizontal spread of shoulder, hip and knee
    pub alignment_deviation: Option<f32>,
    /// Head (or shoulder) to ankle vertical extent
    pub vertical_extent: Option<f32>,
}

impl PostureMeasurements {
    /// Measure a frame, or `None` when the torso is not visible enough to
    /// classify at all
    pub fn measure(frame: &Frame, height: HeightSnapshot, config: &ClassifierConfig) -> Option<Self> {
        if frame.average_visibility(&TORSO) < config.min_torso_visibility {
            return None;
        }

        let vis = config.min_visibility;
        let shoulder = frame.midpoint(LEFT_SHOULDER, RIGHT_SHOULDER, vis);
        let hip = frame.midpoint(LEFT_HIP, RIGHT_HIP, vis);
        let knee = frame.midpoint(LEFT_KNEE, RIGHT_KNEE, vis);
        let ankle = frame.midpoint(LEFT_ANKLE, RIGHT_ANKLE, vis);

        let body_ratio = match (shoulder, hip, ankle) {
            (Some(s), Some(h), Some(a)) => {
                let torso = (s.y - h.y).abs();
                if torso < config.min_torso_length {
                    Some(config.neutral_ratio)
                } else {
                    Some((h.y - a.y).abs() / torso)
                }
            }
            _ => None,
        };

        let hip_knee_offset = match (hip, knee) {
            (Some(h), Some(k)) => Some(k.y - h.y),
            _ => None,
        };

        let knee_angle = mean(
            [(LEFT_HIP, LEFT_KNEE, LEFT_ANKLE), (RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE)]
                .iter()
                .filter_map(|&(h, k, a)| leg_angle(frame, h, k, a, vis)),
        );

        let alignment_deviation = match (shoulder, hip, knee) {
            (Some(s), Some(h), Some(k)) => {
                let xs = [s.x, h.x, k.x];
                let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let min = xs.iter().copied().fold(f32::INFINITY, f32::min);
                Some(max - min)
            }
            _ => None,
        };

        let top = frame.visible(NOSE, vis).or(shoulder);
        let vertical_extent = match (top, ankle) {
            (Some(t), Some(a)) => Some(a.y - t.y),
            _ => None,
        };

        Some(Self {
            body_ratio,
            hip_knee_offset,
            height,
            knee_angle,
            alignment_deviation,
            vertical_extent,
        })
    }
}

fn leg_angle(frame: &Frame, hip: usize, knee: usize, ankle: usize, vis: f32) -> Option<f32> {
    let h: Point = frame.visible(hip, vis)?;
    let k = frame.visible(knee, vis)?;
    let a = frame.visible(ankle, vis)?;
    Some(angle_at(h, k, a))
}
