//! Skeleton color suggestions for the external renderer
//!
//! The crate draws nothing itself; each record carries the color the
//! renderer should use for the skeleton.

use crate::hands::{HandPosition, HandSupport};
use crate::pose::BODY_SKELETON;
use crate::posture::PostureState;
use crate::stability::SwayLevel;

/// RGBA colors, 0-1 per channel
pub mod colors {
    /// Confirmed standing
    pub const GREEN: [f32; 4] = [0.2, 1.0, 0.4, 1.0];
    /// Confirmed sitting
    pub const CYAN: [f32; 4] = [0.2, 0.9, 0.9, 1.0];
    /// Posture not yet known
    pub const YELLOW: [f32; 4] = [1.0, 0.9, 0.2, 1.0];
    /// Pushing off the knees
    pub const RED: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
}

pub fn skeleton_color(state: PostureState, hands: HandPosition) -> [f32; 4] {
    if hands == HandPosition::HandsPushing {
        return colors::RED;
    }
    match state {
        PostureState::Standing => colors::GREEN,
        PostureState::Sitting => colors::CYAN,
        PostureState::Unknown => colors::YELLOW,
    }
}

/// Quiet-standing color: red when falling or holding on, yellow while swaying
pub fn stability_color(state: PostureState, sway: SwayLevel, support: HandSupport) -> [f32; 4] {
    if sway == SwayLevel::LostBalance || support == HandSupport::HeavySupport {
        return colors::RED;
    }
    if sway == SwayLevel::Swaying {
        return colors::YELLOW;
    }
    skeleton_color(state, HandPosition::Unknown)
}

/// Bone list as flat index pairs, ready for a JS `Uint32Array`
pub fn skeleton_indices() -> Vec<u32> {
    BODY_SKELETON
        .iter()
        .flat_map(|&(a, b)| [a as u32, b as u32])
        .collect()
}

/// CSS color string for canvas-based renderers
pub fn to_css(color: [f32; 4]) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {:.2})",
        channel(color[0]), channel(color[1]), channel(color[2]), color[3].clamp(0.0, 1.0)
    )
}
