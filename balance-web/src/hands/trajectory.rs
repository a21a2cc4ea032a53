//! Wrist trajectory samples
//!
//! One sample per frame with the wrist height and the torso/leg landmarks
//! it is judged against.

use serde::Serialize;

use crate::pose::{
    angle_at, mean, Frame,
    LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST, LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WristSample {
    /// Average of both wrists (or the visible one)
    pub wrist_y: f32,
    pub shoulder_y: f32,
    pub hip_y: f32,
    pub knee_y: f32,
    /// Shoulder-elbow-wrist angle averaged over visible arms
    pub elbow_angle: Option<f32>,
    pub timestamp: f64,
}

impl WristSample {
    /// `None` when wrists, shoulders, hips or knees cannot be seen
    pub fn from_frame(frame: &Frame, timestamp: f64, min_visibility: f32) -> Option<Self> {
        let wrist = frame.midpoint(LEFT_WRIST, RIGHT_WRIST, min_visibility)?;
        let shoulder = frame.midpoint(LEFT_SHOULDER, RIGHT_SHOULDER, min_visibility)?;
        let hip = frame.midpoint(LEFT_HIP, RIGHT_HIP, min_visibility)?;
        let knee = frame.midpoint(LEFT_KNEE, RIGHT_KNEE, min_visibility)?;

        let elbow_angle = mean(
            [(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST), (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST)]
                .iter()
                .filter_map(|&(s, e, w)| {
                    Some(angle_at(
                        frame.visible(s, min_visibility)?,
                        frame.visible(e, min_visibility)?,
                        frame.visible(w, min_visibility)?,
                    ))
                }),
        );

        Some(Self {
            wrist_y: wrist.y,
            shoulder_y: shoulder.y,
            hip_y: hip.y,
            knee_y: knee.y,
            elbow_angle,
            timestamp,
        })
    }

    /// Wrist between hip and knee height, widened by `tolerance` each side
    pub fn in_knee_band(&self, tolerance: f32) -> bool {
        let top = self.hip_y.min(self.knee_y) - tolerance;
        let bottom = self.hip_y.max(self.knee_y) + tolerance;
        (top..=bottom).contains(&self.wrist_y)
    }
}
