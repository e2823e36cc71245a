//! Primitive 2D intersection routines.
//!
//! All heterogeneous element intersections reduce to three cases:
//! linear×linear, linear×circle, and circle×circle. Linear spans cover
//! segments, rays, and infinite lines through their parameter interval;
//! circle spans cover arcs through their angular range.

use super::angle::angle_to_arc_param;
use super::{cross_2d, Point2, Vector2, ACCURACY, PARAM_EPS};

/// A parametric linear locus `P(t) = origin + t * dir` restricted to
/// `t` in `[lo, hi]` (either bound may be infinite).
#[derive(Debug, Clone, Copy)]
pub struct LinearSpan {
    pub origin: Point2,
    pub dir: Vector2,
    pub lo: f64,
    pub hi: f64,
}

impl LinearSpan {
    /// Point at parameter `t`.
    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }

    fn contains_param(&self, t: f64) -> bool {
        // Scale the slack by the direction length so segments (whose
        // dir is the full chord) get the same geometric slack as rays.
        let len = self.dir.norm().max(1.0);
        t >= self.lo - PARAM_EPS / len && t <= self.hi + PARAM_EPS / len
    }
}

/// A circular arc locus: angles `start_angle + sweep * t` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct CircleSpan {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Intersection of two linear spans.
///
/// Returns at most one point; parallel (and collinear-overlapping)
/// spans yield none.
#[must_use]
pub fn linear_linear(a: &LinearSpan, b: &LinearSpan) -> Vec<(Point2, f64, f64)> {
    let cross = cross_2d(&a.dir, &b.dir);
    if cross.abs() < ACCURACY {
        return Vec::new();
    }

    let d = b.origin - a.origin;
    let t = cross_2d(&d, &b.dir) / cross;
    let u = cross_2d(&d, &a.dir) / cross;

    if a.contains_param(t) && b.contains_param(u) {
        let t = t.clamp(a.lo, a.hi);
        let u = u.clamp(b.lo, b.hi);
        vec![(a.point(t), t, u)]
    } else {
        Vec::new()
    }
}

/// Intersection of a linear span with a circular arc.
///
/// Returns `(point, t_linear, t_arc)` tuples with `t_arc` in `[0, 1]`.
#[must_use]
pub fn linear_circle(l: &LinearSpan, c: &CircleSpan) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if c.radius < ACCURACY || c.sweep.abs() < ACCURACY {
        return results;
    }

    let dir_sq = l.dir.norm_squared();
    if dir_sq < ACCURACY * ACCURACY {
        return results;
    }

    // Substitute the parametric line into the circle equation:
    // |origin + t*dir - center|² = r²
    let f = l.origin - c.center;
    let a = dir_sq;
    let b = 2.0 * f.dot(&l.dir);
    let k = f.norm_squared() - c.radius * c.radius;
    let discriminant = b * b - 4.0 * a * k;

    if discriminant < -ACCURACY {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let t_roots = if disc_sqrt < PARAM_EPS {
        // Tangent case: single root.
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    for t in t_roots {
        if !l.contains_param(t) {
            continue;
        }
        let t = t.clamp(l.lo, l.hi);
        let p = l.point(t);
        let angle = (p.y - c.center.y).atan2(p.x - c.center.x);
        if let Some(u) = angle_to_arc_param(angle, c.start_angle, c.sweep) {
            results.push((p, t, u));
        }
    }

    results
}

/// Intersection of two circular arcs.
///
/// Returns `(point, t_a, t_b)` tuples with both parameters in `[0, 1]`.
/// Concentric circles yield no points, even when coincident.
#[must_use]
pub fn circle_circle(a: &CircleSpan, b: &CircleSpan) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if a.radius < ACCURACY || b.radius < ACCURACY {
        return results;
    }

    let d = b.center - a.center;
    let dist_sq = d.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < ACCURACY {
        return results;
    }

    let sum = a.radius + b.radius;
    let diff = (a.radius - b.radius).abs();
    if dist > sum + PARAM_EPS || dist < diff - PARAM_EPS {
        return results;
    }

    // Distance from a's center along the center line to the radical line.
    let along = (a.radius * a.radius - b.radius * b.radius + dist_sq) / (2.0 * dist);
    let h_sq = a.radius * a.radius - along * along;
    if h_sq < -PARAM_EPS {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    let mid = a.center + d * (along / dist);
    let perp = Vector2::new(-d.y / dist, d.x / dist);

    let candidates = if h < PARAM_EPS {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    for p in candidates {
        let angle_a = (p.y - a.center.y).atan2(p.x - a.center.x);
        let angle_b = (p.y - b.center.y).atan2(p.x - b.center.x);

        let ta = angle_to_arc_param(angle_a, a.start_angle, a.sweep);
        let tb = angle_to_arc_param(angle_b, b.start_angle, b.sweep);

        if let (Some(ta), Some(tb)) = (ta, tb) {
            results.push((p, ta, tb));
        }
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn segment_span(x0: f64, y0: f64, x1: f64, y1: f64) -> LinearSpan {
        LinearSpan {
            origin: Point2::new(x0, y0),
            dir: Vector2::new(x1 - x0, y1 - y0),
            lo: 0.0,
            hi: 1.0,
        }
    }

    #[test]
    fn crossing_segments() {
        let a = segment_span(0.0, 0.0, 2.0, 2.0);
        let b = segment_span(0.0, 2.0, 2.0, 0.0);
        let hits = linear_linear(&a, &b);
        assert_eq!(hits.len(), 1);
        let (p, t, u) = hits[0];
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!((t - 0.5).abs() < 1e-12);
        assert!((u - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parallel_segments_miss() {
        let a = segment_span(0.0, 0.0, 1.0, 0.0);
        let b = segment_span(0.0, 1.0, 1.0, 1.0);
        assert!(linear_linear(&a, &b).is_empty());
    }

    #[test]
    fn crossing_outside_interval_misses() {
        let a = segment_span(0.0, 0.0, 1.0, 0.0);
        let b = segment_span(5.0, -1.0, 5.0, 1.0);
        assert!(linear_linear(&a, &b).is_empty());
    }

    #[test]
    fn unbounded_line_hits_far_segment() {
        let line = LinearSpan {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(1.0, 0.0),
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        };
        let seg = segment_span(100.0, -1.0, 100.0, 1.0);
        let hits = linear_linear(&line, &seg);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn segment_through_semicircle() {
        // Horizontal segment through the unit circle at y=0; the upper
        // semicircle is hit at both of its endpoints (1,0) and (-1,0).
        let seg = segment_span(-2.0, 0.0, 2.0, 0.0);
        let arc = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: PI,
        };
        let hits = linear_circle(&seg, &arc);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
    }

    #[test]
    fn segment_tangent_to_circle() {
        let seg = segment_span(-1.0, 1.0, 1.0, 1.0);
        let arc = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: PI,
        };
        let hits = linear_circle(&seg, &arc);
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!(hits[0].0.x.abs() < 1e-6);
        assert!((hits[0].0.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn segment_misses_arc_angular_range() {
        // Crosses the circle at angles 0 and π, but the arc only covers
        // the first quadrant's upper half.
        let seg = segment_span(-2.0, 0.0, 2.0, 0.0);
        let arc = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: PI / 4.0,
            sweep: PI / 4.0,
        };
        assert!(linear_circle(&seg, &arc).is_empty());
    }

    #[test]
    fn two_unit_circles_cross_twice() {
        let a = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        let b = CircleSpan {
            center: Point2::new(1.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        let hits = circle_circle(&a, &b);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        let mut ys: Vec<f64> = hits.iter().map(|h| h.0.y).collect();
        ys.sort_by(|p, q| p.partial_cmp(q).unwrap());
        assert!((ys[0] + sqrt3_2).abs() < 1e-9);
        assert!((ys[1] - sqrt3_2).abs() < 1e-9);
    }

    #[test]
    fn tangent_circles_touch_once() {
        let a = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        let b = CircleSpan {
            center: Point2::new(2.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        let hits = circle_circle(&a, &b);
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!((hits[0].0.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn concentric_circles_have_no_crossings() {
        let a = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        let b = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 2.0,
            start_angle: 0.0,
            sweep: 2.0 * PI,
        };
        assert!(circle_circle(&a, &b).is_empty());
    }

    #[test]
    fn far_circles_miss() {
        let a = CircleSpan {
            center: Point2::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: PI,
        };
        let b = CircleSpan {
            center: Point2::new(5.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            sweep: PI,
        };
        assert!(circle_circle(&a, &b).is_empty());
    }
}
