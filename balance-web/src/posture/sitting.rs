//! Sitting classifier
//!
//! Soft vote over five signals, each adding a capped number of points.
//! No single signal can decide on its own except by combining with others.

use crate::config::ClassifierConfig;
use crate::pose::Frame;
use super::height::HeightSnapshot;
use super::measurements::PostureMeasurements;
use super::result::{PostureDetails, PostureResult, SignalPoints};

/// Classify one frame as sitting
pub fn detect_sitting(frame: &Frame, height: HeightSnapshot, config: &ClassifierConfig) -> PostureResult {
    match PostureMeasurements::measure(frame, height, config) {
        Some(m) => score_sitting(&m, config),
        None => PostureResult::undetected(),
    }
}

/// Sitting confidence from pre-measured signals
pub fn score_sitting(m: &PostureMeasurements, config: &ClassifierConfig) -> PostureResult {
    let points = SignalPoints {
        body_ratio: ratio_points(m.body_ratio, config),
        hip_knee: hip_knee_points(m.hip_knee_offset, config),
        head_height: height_points(m.height, config),
        knee_angle: knee_points(m.knee_angle, config),
        alignment: alignment_points(m, config),
    };

    let confidence = points.total().clamp(0.0, 100.0);
    PostureResult {
        detected: confidence >= config.sitting_threshold,
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

/// Short legs relative to the torso (thighs foreshortened by sitting)
fn ratio_points(ratio: Option<f32>, c: &ClassifierConfig) -> f32 {
    match ratio {
        Some(r) if r < c.sitting_ratio_max => {
            ((c.sitting_ratio_max - r) * c.sitting_ratio_scale).min(c.sitting_ratio_cap)
        }
        _ => 0.0,
    }
}

/// Knee level with or above the hip
fn hip_knee_points(offset: Option<f32>, c: &ClassifierConfig) -> f32 {
    match offset {
        Some(d) if d < c.sitting_offset_max => {
            ((c.sitting_offset_max - d) / c.sitting_offset_max * c.sitting_offset_cap)
                .min(c.sitting_offset_cap)
        }
        _ => 0.0,
    }
}

/// Head well below the standing baseline
fn height_points(height: HeightSnapshot, c: &ClassifierConfig) -> f32 {
    match height.drop() {
        Some(drop) if drop > c.sitting_drop_min => (drop / c.sitting_drop_span * c.height_cap).min(c.height_cap),
        _ => 0.0,
    }
}

/// Triangular falloff around a right-ish knee angle
fn knee_points(angle: Option<f32>, c: &ClassifierConfig) -> f32 {
    match angle {
        Some(a) if (c.sitting_knee_min..=c.sitting_knee_max).contains(&a) => {
            let half_span = (c.sitting_knee_max - c.sitting_knee_min) / 2.0;
            (c.knee_cap * (1.0 - (a - c.sitting_knee_center).abs() / half_span)).max(0.0)
        }
        _ => 0.0,
    }
}

fn alignment_points(m: &PostureMeasurements, c: &ClassifierConfig) -> f32 {
    match (m.alignment_deviation, m.body_ratio) {
        (Some(dev), Some(r)) if dev < c.alignment_max_deviation && r < c.sitting_ratio_max => c.alignment_points,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::TORSO;
    use crate::posture::testing::{seated_frame, standing_frame, FrameBuilder};

    fn neutral(body_ratio: f32, hip_knee_offset: f32, knee_angle: f32) -> PostureMeasurements {
        PostureMeasurements {
            body_ratio: Some(body_ratio),
            hip_knee_offset: Some(hip_knee_offset),
            knee_angle: Some(knee_angle),
            ..Default::default()
        }
    }

    #[test]
    fn right_angle_knee_and_level_thigh_is_sitting() {
        let config = ClassifierConfig::default();
        let result = score_sitting(&neutral(0.8, 0.0, 95.0), &config);
        let p = result.details.points;
        assert!((p.body_ratio - 36.0).abs() < 1e-3);
        assert!((p.hip_knee - 35.0).abs() < 1e-3);
        assert!((p.knee_angle - 15.0).abs() < 1e-3);
        assert_eq!(p.head_height, 0.0);
        assert_eq!(p.alignment, 0.0);
        assert!(result.confidence >= 35.0);
        assert!(result.detected);
    }

    #[test]
    fn each_signal_respects_its_cap() {
        let config = ClassifierConfig::default();
        let m = PostureMeasurements {
            body_ratio: Some(0.0),
            hip_knee_offset: Some(-0.5),
            knee_angle: Some(95.0),
            alignment_deviation: Some(0.0),
            height: HeightSnapshot { average: Some(0.9), baseline: Some(0.1) },
            vertical_extent: None,
        };
        let p = score_sitting(&m, &config).details.points;
        assert_eq!(p.body_ratio, 40.0);
        assert_eq!(p.hip_knee, 35.0);
        assert_eq!(p.head_height, 20.0);
        assert_eq!(p.alignment, 10.0);
    }

    #[test]
    fn knee_angle_outside_sitting_range_scores_nothing() {
        let config = ClassifierConfig::default();
        assert_eq!(knee_points(Some(45.0), &config), 0.0);
        assert_eq!(knee_points(Some(160.0), &config), 0.0);
        assert!(knee_points(Some(130.0), &config) > 0.0);
    }

    #[test]
    fn seated_frame_is_sitting_and_standing_frame_is_not() {
        let config = ClassifierConfig::default();
        assert!(detect_sitting(&seated_frame(), HeightSnapshot::default(), &config).detected);
        let standing = detect_sitting(&standing_frame(), HeightSnapshot::default(), &config);
        assert!(!standing.detected);
        assert_eq!(standing.confidence, 0.0);
    }

    #[test]
    fn low_torso_visibility_yields_zero() {
        let frame = FrameBuilder::seated().visibility(&TORSO, 0.2).build();
        let result = detect_sitting(&frame, HeightSnapshot::default(), &ClassifierConfig::default());
        assert_eq!(result.confidence, 0.0);
        assert!(!result.detected);
    }
}
