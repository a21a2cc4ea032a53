//! Synthetic frames for unit tests

use crate::pose::{
    Frame, Landmark, LANDMARK_COUNT,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST, LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
};

/// Half the horizontal gap between left and right landmarks of a pair
const HALF_WIDTH: f32 = 0.05;

pub struct FrameBuilder {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl FrameBuilder {
    pub fn empty() -> Self {
        Self { landmarks: [Landmark::default(); LANDMARK_COUNT] }
    }

    /// Seated side view: thighs horizontal, shins vertical, arms crossed
    pub fn seated() -> Self {
        Self::empty()
            .point(NOSE, 0.45, 0.30)
            .pair(LEFT_SHOULDER, RIGHT_SHOULDER, 0.45, 0.45)
            .pair(LEFT_ELBOW, RIGHT_ELBOW, 0.48, 0.58)
            .pair(LEFT_WRIST, RIGHT_WRIST, 0.47, 0.52)
            .pair(LEFT_HIP, RIGHT_HIP, 0.45, 0.70)
            .pair(LEFT_KNEE, RIGHT_KNEE, 0.65, 0.70)
            .pair(LEFT_ANKLE, RIGHT_ANKLE, 0.65, 0.90)
    }

    /// Upright, legs straight, arms crossed over the chest
    pub fn standing() -> Self {
        Self::empty()
            .point(NOSE, 0.5, 0.08)
            .pair(LEFT_SHOULDER, RIGHT_SHOULDER, 0.5, 0.25)
            .pair(LEFT_ELBOW, RIGHT_ELBOW, 0.5, 0.38)
            .pair(LEFT_WRIST, RIGHT_WRIST, 0.5, 0.33)
            .pair(LEFT_HIP, RIGHT_HIP, 0.5, 0.50)
            .pair(LEFT_KNEE, RIGHT_KNEE, 0.5, 0.72)
            .pair(LEFT_ANKLE, RIGHT_ANKLE, 0.5, 0.95)
    }

    pub fn point(mut self, index: usize, x: f32, y: f32) -> Self {
        self.landmarks[index] = Landmark { x, y, z: 0.0, visibility: 1.0 };
        self
    }

    /// Place a left/right pair symmetrically around `x`
    pub fn pair(self, left: usize, right: usize, x: f32, y: f32) -> Self {
        self.point(left, x - HALF_WIDTH, y).point(right, x + HALF_WIDTH, y)
    }

    pub fn hide(mut self, indices: &[usize]) -> Self {
        for &i in indices {
            self.landmarks[i].visibility = 0.0;
        }
        self
    }

    pub fn visibility(mut self, indices: &[usize], visibility: f32) -> Self {
        for &i in indices {
            self.landmarks[i].visibility = visibility;
        }
        self
    }

    pub fn build(self) -> Frame {
        Frame::new(self.landmarks)
    }
}

pub fn seated_frame() -> Frame {
    FrameBuilder::seated().build()
}

pub fn standing_frame() -> Frame {
    FrameBuilder::standing().build()
}
