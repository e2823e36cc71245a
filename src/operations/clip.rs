//! Clipping a curve to an axis-aligned box.

use crate::error::Result;
use crate::geometry::curve_set::finite_bounds;
use crate::geometry::{Box2, Curve, CurveSet, Element, Segment};
use crate::math::{Point2, PARAM_EPS};
use crate::operations::positions::PositionTable;

/// Restricts a curve to an axis-aligned box, producing the set of
/// continuous fragments that lie inside it.
#[derive(Debug)]
pub struct ClipCurve {
    curve: Curve,
    bbox: Box2,
}

impl ClipCurve {
    /// Creates a new clipping operation.
    #[must_use]
    pub fn new(curve: Curve, bbox: Box2) -> Self {
        Self { curve, bbox }
    }

    /// Executes the clip.
    ///
    /// The result is empty when the curve lies entirely outside the
    /// box, a singleton equal to the input when it lies entirely
    /// inside, and one fragment per crossing span otherwise.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible to match the other
    /// operations' contract.
    pub fn execute(&self) -> Result<CurveSet> {
        let domain = self.curve.domain();
        let closed = self.curve.is_closed();

        let positions = self.crossing_positions(closed, domain.t_min, domain.t_max);

        if positions.is_empty() {
            // Entirely inside or entirely outside; one sample decides.
            let (lo, hi) = finite_bounds(domain.t_min, domain.t_max);
            let inside = self.bbox.contains(&self.curve.point(0.5 * (lo + hi)));
            return Ok(if inside {
                CurveSet::from_curves(vec![self.curve.clone()])
            } else {
                CurveSet::new()
            });
        }

        let mut fragments = Vec::new();
        if closed {
            // Spans run cyclically between consecutive crossings; the
            // last span wraps through the curve's seam.
            let n = positions.len();
            let span_len = domain.t_max - domain.t_min;
            for i in 0..n {
                let a = positions[i];
                let b = positions[(i + 1) % n];
                let b_unwrapped = if i + 1 == n { b + span_len } else { b };
                if b_unwrapped - a < PARAM_EPS {
                    continue;
                }
                let mid = self.wrap(0.5 * (a + b_unwrapped), domain.t_min, domain.t_max);
                if self.bbox.contains(&self.curve.point(mid)) {
                    fragments.push(self.curve.sub_curve(a, b));
                }
            }
        } else {
            let mut bounds = Vec::with_capacity(positions.len() + 2);
            bounds.push(domain.t_min);
            bounds.extend_from_slice(&positions);
            bounds.push(domain.t_max);
            for w in bounds.windows(2) {
                let (a, b) = (w[0], w[1]);
                if b - a < PARAM_EPS {
                    continue;
                }
                if self.bbox.contains(&self.sample_between(a, b)) {
                    fragments.push(self.curve.sub_curve(a, b));
                }
            }
        }

        Ok(CurveSet::from_curves(fragments))
    }

    /// Sorted positions where the curve genuinely crosses the box
    /// boundary. Touch points (tangencies, grazed corners) and the
    /// extremities of an open curve are filtered out.
    fn crossing_positions(&self, closed: bool, t_min: f64, t_max: f64) -> Vec<f64> {
        let mut raw = Vec::new();
        for (i, piece) in self.curve.pieces().iter().enumerate() {
            for edge in self.edges() {
                for (_, tp, _) in piece.intersections(&Element::Segment(edge)) {
                    raw.push(self.curve.globalize(i, tp));
                }
            }
        }

        let table = PositionTable::build(&raw);
        let mut positions: Vec<f64> = (0..table.len()).map(|i| table.position(i)).collect();

        if !closed {
            // A curve that merely starts or ends on the boundary does
            // not cross there.
            positions.retain(|t| {
                (t_min.is_infinite() || (t - t_min).abs() > PARAM_EPS)
                    && (t_max.is_infinite() || (t - t_max).abs() > PARAM_EPS)
            });
        }

        // Tangency filter: a position where both neighboring samples
        // fall on the same side of the boundary is a touch, not a
        // crossing.
        let n = positions.len();
        let span_len = t_max - t_min;
        let kept: Vec<f64> = (0..n)
            .filter(|&i| {
                let t = positions[i];
                let prev = if i > 0 {
                    positions[i - 1]
                } else if closed {
                    positions[n - 1] - span_len
                } else {
                    t_min
                };
                let next = if i + 1 < n {
                    positions[i + 1]
                } else if closed {
                    positions[0] + span_len
                } else {
                    t_max
                };
                let before = self.bbox.contains(&self.sample_wrapped(prev, t, t_min, t_max));
                let after = self.bbox.contains(&self.sample_wrapped(t, next, t_min, t_max));
                before != after
            })
            .map(|i| positions[i])
            .collect();
        kept
    }

    fn edges(&self) -> [Segment; 4] {
        let c = self.bbox.corners();
        [
            Segment::new(c[0], c[1]),
            Segment::new(c[1], c[2]),
            Segment::new(c[2], c[3]),
            Segment::new(c[3], c[0]),
        ]
    }

    /// Point strictly between two positions, substituting a finite
    /// sentinel for an infinite bound.
    fn sample_between(&self, a: f64, b: f64) -> Point2 {
        let (la, lb) = finite_bounds(a, b);
        self.curve.point(0.5 * (la + lb))
    }

    fn sample_wrapped(&self, a: f64, b: f64, t_min: f64, t_max: f64) -> Point2 {
        let (la, lb) = finite_bounds(a, b);
        let mid = self.wrap(0.5 * (la + lb), t_min, t_max);
        self.curve.point(mid)
    }

    fn wrap(&self, t: f64, t_min: f64, t_max: f64) -> f64 {
        if self.curve.is_closed() && t_min.is_finite() && t_max.is_finite() {
            t_min + (t - t_min).rem_euclid(t_max - t_min)
        } else {
            t
        }
    }
}
