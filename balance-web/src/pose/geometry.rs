//! Joint angles and distances
//!
//! Angle at a joint uses the dot product of the two limb vectors:
//! cos(θ) = (v1 · v2) / (|v1| × |v2|)

use nalgebra::Vector2;

use super::landmark::Point;

/// Angle at `vertex` between `vertex→a` and `vertex→c`, in degrees
///
/// - 90° = joint bent at a right angle
/// - 180° = limb straight
pub fn angle_at(a: Point, vertex: Point, c: Point) -> f32 {
    let v1 = Vector2::new(a.x - vertex.x, a.y - vertex.y);
    let v2 = Vector2::new(c.x - vertex.x, c.y - vertex.y);

    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Handle degenerate case
    if mag1 < 0.0001 || mag2 < 0.0001 {
        return 180.0; // Assume straight if we can't calculate
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f32 {
    (Vector2::new(b.x, b.y) - Vector2::new(a.x, a.y)).norm()
}

/// Arithmetic mean, `None` for an empty input
pub fn mean<I>(values: I) -> Option<f32>
where
    I: IntoIterator<Item = f32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f32)
}
