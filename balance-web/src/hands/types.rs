//! Hand position and support levels

use serde::{Deserialize, Serialize};

/// Instantaneous wrist location relative to the legs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandPosition {
    /// Wrists clear of the thighs (raised or hanging free)
    HandsUp,
    HandsOnKnee,
    HandsPushing,
    #[default]
    Unknown,
}

impl HandPosition {
    pub fn name(&self) -> &'static str {
        match self {
            HandPosition::HandsUp => "HANDS_UP",
            HandPosition::HandsOnKnee => "HANDS_ON_KNEE",
            HandPosition::HandsPushing => "HANDS_PUSHING",
            HandPosition::Unknown => "UNKNOWN",
        }
    }
}

/// Clinical severity of hand assistance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandSupport {
    NoSupport,
    LightSupport,
    HeavySupport,
    #[default]
    Unknown,
}

impl HandSupport {
    pub fn name(&self) -> &'static str {
        match self {
            HandSupport::NoSupport => "NO_SUPPORT",
            HandSupport::LightSupport => "LIGHT_SUPPORT",
            HandSupport::HeavySupport => "HEAVY_SUPPORT",
            HandSupport::Unknown => "UNKNOWN",
        }
    }
}

/// Which kinematic signature declared a push
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushSignal {
    /// Torso rose while the wrist stayed anchored
    RiseRatio,
    /// Wrist pressed downward inside the knee band
    DownwardPress,
    /// Arm straightened with the hand anchored
    ElbowExtension,
    /// Wrist dwelt in the knee band through the rise
    Dwell,
}

/// Ordered support resolution, evaluated once the subject stands
///
/// Order is precedence: a latched push outranks everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportRule {
    PushedOffKnees,
    RestedOnKnee,
    HandsReleased,
    Normal,
}

impl SupportRule {
    pub fn resolve(pushed: bool, on_knee: bool, released: bool) -> Self {
        if pushed {
            SupportRule::PushedOffKnees
        } else if on_knee && !released {
            SupportRule::RestedOnKnee
        } else if released {
            SupportRule::HandsReleased
        } else {
            SupportRule::Normal
        }
    }

    pub fn support(&self) -> HandSupport {
        match self {
            SupportRule::PushedOffKnees => HandSupport::HeavySupport,
            SupportRule::RestedOnKnee => HandSupport::LightSupport,
            SupportRule::HandsReleased | SupportRule::Normal => HandSupport::NoSupport,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SupportRule::PushedOffKnees => "Pushed off the knees with the hands to stand",
            SupportRule::RestedOnKnee => "Hand rested on the knee while rising, no push",
            SupportRule::HandsReleased => "Hands kept off the knees while rising",
            SupportRule::Normal => "Normal rise",
        }
    }
}

/// Per-frame hand diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandDebug {
    pub wrist_y: Option<f32>,
    pub shoulder_rise: Option<f32>,
    pub wrist_rise: Option<f32>,
    pub trajectory_len: usize,
    pub in_knee_band: bool,
    pub push_signal: Option<PushSignal>,
    pub pushed_during_transition: bool,
}

/// Output of the hand detector for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandReading {
    pub position: HandPosition,
    pub support: HandSupport,
    pub message: String,
    pub debug: HandDebug,
}

impl Default for HandReading {
    fn default() -> Self {
        Self {
            position: HandPosition::Unknown,
            support: HandSupport::Unknown,
            message: String::from("Hands not visible"),
            debug: HandDebug::default(),
        }
    }
}
