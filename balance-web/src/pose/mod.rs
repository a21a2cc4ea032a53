//! Pose module - landmark layout and geometry primitives
//!
//! Re-exports only. All logic in submodules.

mod geometry;
mod landmark;

pub use geometry::{angle_at, distance, mean};
pub use landmark::{
    Frame, Landmark, Point,
    LANDMARK_COUNT, BODY_SKELETON, TORSO,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
};
