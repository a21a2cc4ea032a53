//! Pose landmarks as delivered by the pose source
//!
//! One frame is the 33-point MediaPipe Pose layout. Frames are never
//! mutated after construction.

use serde::{Deserialize, Serialize};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Skeleton connections for the rendering sink (pairs of landmark indices)
pub const BODY_SKELETON: [(usize, usize); 12] = [
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_HIP, RIGHT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
];

/// Torso landmarks gating every posture classification
pub const TORSO: [usize; 4] = [LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_HIP, RIGHT_HIP];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark (image-normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized, grows downward
    pub z: f32,  // Relative depth
    pub visibility: f32,
}

impl Landmark {
    /// Visibility, or 0 when the position or visibility is not a finite number
    pub fn usable_visibility(&self) -> f32 {
        if self.x.is_finite() && self.y.is_finite() && self.visibility.is_finite() {
            self.visibility
        } else {
            0.0
        }
    }
}

/// 2D point in normalized image space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Landmark> for Point {
    fn from(lm: Landmark) -> Self {
        Self { x: lm.x, y: lm.y }
    }
}

/// One complete set of landmarks for a single instant
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Frame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    /// The landmark as a point, if it clears the visibility threshold
    pub fn visible(&self, index: usize, min_visibility: f32) -> Option<Point> {
        let lm = self.landmarks[index];
        (lm.usable_visibility() >= min_visibility).then(|| lm.into())
    }

    /// Midpoint of a left/right pair
    ///
    /// Falls back to whichever side is visible; `None` when neither is.
    pub fn midpoint(&self, left: usize, right: usize, min_visibility: f32) -> Option<Point> {
        match (self.visible(left, min_visibility), self.visible(right, min_visibility)) {
            (Some(l), Some(r)) => Some(Point::new((l.x + r.x) / 2.0, (l.y + r.y) / 2.0)),
            (Some(p), None) | (None, Some(p)) => Some(p),
            (None, None) => None,
        }
    }

    pub fn average_visibility(&self, indices: &[usize]) -> f32 {
        if indices.is_empty() {
            return 0.0;
        }
        let total: f32 = indices.iter().map(|&i| self.landmarks[i].usable_visibility()).sum();
        total / indices.len() as f32
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new([Landmark::default(); LANDMARK_COUNT])
    }
}
