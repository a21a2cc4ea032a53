//! Standing classifier
//!
//! Mirror of the sitting vote with its own caps. Standing needs a higher
//! total before it is reported, so a subject caught mid-rise stays seated.

use crate::config::ClassifierConfig;
use crate::pose::Frame;
use super::height::HeightSnapshot;
use super::measurements::PostureMeasurements;
use super::result::{PostureDetails, PostureResult, SignalPoints};

/// Classify one frame as standing
pub fn detect_standing(frame: &Frame, height: HeightSnapshot, config: &ClassifierConfig) -> PostureResult {
    match PostureMeasurements::measure(frame, height, config) {
        Some(m) => score_standing(&m, config),
        None => PostureResult::undetected(),
    }
}

/// Standing confidence from pre-measured signals
pub fn score_standing(m: &PostureMeasurements, config: &ClassifierConfig) -> PostureResult {
    let points = SignalPoints {
        body_ratio: ratio_points(m.body_ratio, config),
        hip_knee: hip_knee_points(m.hip_knee_offset, config),
        head_height: height_points(m.height, config),
        knee_angle: knee_points(m.knee_angle, config),
        alignment: extent_points(m.vertical_extent, config),
    };

    let confidence = points.total().clamp(0.0, 100.0);
    PostureResult {
        detected: confidence >= config.standing_threshold,
        confidence,
        details: PostureDetails {
            body_ratio: m.body_ratio,
            hip_knee_offset: m.hip_knee_offset,
            height_drop: m.height.drop(),
            baseline_set: m.height.baseline.is_some(),
            knee_angle: m.knee_angle,
            alignment_deviation: m.alignment_deviation,
            vertical_extent: m.vertical_extent,
            points,
        },
    }
}

fn ratio_points(ratio: Option<f32>, c: &ClassifierConfig) -> f32 {
    match ratio {
        Some(r) if r > c.standing_ratio_min => {
            ((r - c.standing_ratio_min) * c.standing_ratio_scale).min(c.standing_ratio_cap)
        }
        _ => 0.0,
    }
}

fn hip_knee_points(offset: Option<f32>, c: &ClassifierConfig) -> f32 {
    match offset {
        Some(d) if d > c.standing_offset_min => {
            ((d - c.standing_offset_min) / c.standing_offset_span * c.standing_offset_cap)
                .min(c.standing_offset_cap)
        }
        _ => 0.0,
    }
}

/// Head at (or above) the baseline; a reduced vote before the baseline exists
fn height_points(height: HeightSnapshot, c: &ClassifierConfig) -> f32 {
    if height.baseline.is_none() {
        return c.unset_baseline_points;
    }
    match height.drop() {
        Some(drop) if drop < c.standing_drop_max => {
            c.height_cap * (1.0 - drop.max(0.0) / c.standing_drop_max)
        }
        _ => 0.0,
    }
}

/// Linear ramp from nearly straight to fully straight
fn knee_points(angle: Option<f32>, c: &ClassifierConfig) -> f32 {
    match angle {
        Some(a) if a >= c.standing_knee_min => {
            let ramp = (a - c.standing_knee_min) / (c.standing_knee_full - c.standing_knee_min);
            c.knee_cap * ramp.min(1.0)
        }
        _ => 0.0,
    }
}

fn extent_points(extent: Option<f32>, c: &ClassifierConfig) -> f32 {
    match extent {
        Some(e) if e > c.standing_extent_min => c.alignment_points,
        _ => 0.0,
    }
}
