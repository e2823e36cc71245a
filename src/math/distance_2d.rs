use super::{Point2, Vector2};
use super::angle::angle_to_arc_param;

/// Minimum distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return (p - a).norm();
    }

    // Project onto the supporting line, clamp to the segment.
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Minimum distance from `p` to a ray `origin + t * dir`, `t >= 0`.
#[must_use]
pub fn point_to_ray_dist(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let t = (p - origin).dot(dir).max(0.0);
    (p - (origin + dir * t)).norm()
}

/// Minimum distance from `p` to the infinite line `origin + t * dir`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let t = (p - origin).dot(dir);
    (p - (origin + dir * t)).norm()
}

/// Minimum distance from `p` to a circular arc.
///
/// If the point's angle relative to the center falls within the arc's
/// sweep, the distance is radial; otherwise it is the distance to the
/// nearer arc endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let v = p - center;
    let dist_to_center = v.norm();

    let angle = v.y.atan2(v.x);
    if angle_to_arc_param(angle, start_angle, sweep).is_some() {
        return (dist_to_center - radius).abs();
    }

    let end_angle = start_angle + sweep;
    let e0 = center + Vector2::new(start_angle.cos(), start_angle.sin()) * radius;
    let e1 = center + Vector2::new(end_angle.cos(), end_angle.sin()) * radius;
    (p - e0).norm().min((p - e1).norm())
}
