//! Parallel (offset) curves with circular junction arcs.

use std::f64::consts::PI;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Arc, Chain, Curve, Element, Line, Ray, Segment};
use crate::math::angle::{wrap_to_pi, ANGLE_EPS};
use crate::math::{left_normal, Point2, ACCURACY};

/// How a vertex between two consecutive pieces relates to the offset
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionKind {
    /// The offset side is outside the corner; a bridging arc is needed.
    Salient,
    /// The offset side is inside the corner; the offset pieces overlap
    /// and downstream trimming removes the excess.
    Reentrant,
    /// Tangent-continuous join; the offset pieces already meet.
    Flat,
}

/// Classifies the junction between two consecutive pieces for a given
/// signed offset distance.
///
/// # Errors
///
/// Returns `OperationError::UnclassifiedJunction` when a piece has no
/// finite tangent at the shared vertex.
pub fn classify_junction(prev: &Element, next: &Element, distance: f64) -> Result<JunctionKind> {
    let curvature_step = next.curvature() - prev.curvature();
    let (Ok(tp), Ok(tn)) = (prev.tangent(1.0), next.tangent(0.0)) else {
        return Err(OperationError::UnclassifiedJunction {
            turn: f64::NAN,
            curvature_step,
        }
        .into());
    };

    let turn = wrap_to_pi(tn.y.atan2(tn.x) - tp.y.atan2(tp.x));
    if !turn.is_finite() {
        return Err(OperationError::UnclassifiedJunction {
            turn,
            curvature_step,
        }
        .into());
    }

    if turn.abs() < ANGLE_EPS {
        // Collinear tangents: the offset extremities coincide whatever
        // the curvatures do, so the junction degenerates.
        return Ok(JunctionKind::Flat);
    }
    // A turn away from the offset side leaves a gap to bridge.
    if (distance > 0.0) == (turn < 0.0) {
        Ok(JunctionKind::Salient)
    } else {
        Ok(JunctionKind::Reentrant)
    }
}

/// Builds the parallel curve at a signed distance.
///
/// Positive distance offsets to the left of the travel direction. At
/// every vertex of a chain a circular junction arc of radius `|d|` is
/// inserted, oriented with the offset side, unless the join is
/// tangent-continuous.
#[derive(Debug)]
pub struct ParallelCurve {
    curve: Curve,
    distance: f64,
}

impl ParallelCurve {
    /// Creates a new parallel-curve operation.
    #[must_use]
    pub fn new(curve: Curve, distance: f64) -> Self {
        Self { curve, distance }
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` when the offset collapses an
    /// arc (the distance reaches the arc's center), and
    /// `OperationError::UnclassifiedJunction` for vertices without
    /// finite tangents.
    pub fn execute(&self) -> Result<Curve> {
        if self.distance.abs() < ACCURACY {
            return Ok(self.curve.clone());
        }

        match &self.curve {
            Curve::Single(el) => Ok(Curve::Single(element_parallel(el, self.distance)?)),
            Curve::Chain(chain) => self.chain_parallel(chain),
        }
    }

    fn chain_parallel(&self, chain: &Chain) -> Result<Curve> {
        let source = chain.elements();
        let offsets: Vec<Element> = source
            .iter()
            .map(|el| element_parallel(el, self.distance))
            .collect::<Result<_>>()?;

        let mut parts: Vec<Element> = Vec::with_capacity(offsets.len() * 2);
        for i in 0..offsets.len() {
            parts.push(offsets[i]);
            let j = i + 1;
            let last = j == offsets.len();
            if last && !chain.is_closed() {
                break;
            }
            let j = if last { 0 } else { j };
            if classify_junction(&source[i], &source[j], self.distance)? != JunctionKind::Flat {
                let vertex = source[j].point(0.0);
                if let Some(arc) =
                    junction_arc(&vertex, &offsets[i].point(1.0), &offsets[j].point(0.0), self.distance)?
                {
                    parts.push(Element::Arc(arc));
                }
            }
        }
        Ok(Curve::Chain(Chain::new(parts, chain.is_closed())))
    }
}

/// Closed-form parallel of one element.
///
/// A line's offset is a line, a circular arc's offset is a concentric
/// arc; an arc whose radius crosses zero flips to the far side of its
/// center, keeping the sweep.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` when the offset distance equals
/// an arc's radius, and `GeometryError::ZeroVector` for a zero-length
/// segment.
pub fn element_parallel(el: &Element, distance: f64) -> Result<Element> {
    match el {
        Element::Segment(s) => {
            let shift = left_normal(s.direction()?) * distance;
            Ok(Element::Segment(Segment::new(s.start + shift, s.end + shift)))
        }
        Element::Ray(r) => {
            let shift = left_normal(*r.direction()) * distance;
            Ok(Element::Ray(Ray::from_unit(r.origin() + shift, *r.direction())))
        }
        Element::Line(l) => {
            let shift = left_normal(*l.direction()) * distance;
            Ok(Element::Line(Line::from_unit(l.origin() + shift, *l.direction())))
        }
        Element::Arc(a) => {
            let sign = if a.sweep >= 0.0 { 1.0 } else { -1.0 };
            let radius = a.radius - sign * distance;
            if radius.abs() < ACCURACY {
                return Err(GeometryError::Degenerate(
                    "offset distance collapses the arc onto its center".into(),
                )
                .into());
            }
            if radius > 0.0 {
                Ok(Element::Arc(Arc::new(a.center, radius, a.start_angle, a.sweep)?))
            } else {
                // Inverted: the offset locus sits on the far side of
                // the center.
                Ok(Element::Arc(Arc::new(
                    a.center,
                    -radius,
                    a.start_angle + PI,
                    a.sweep,
                )?))
            }
        }
    }
}

/// Circular junction arc centered at `vertex`, from offset extremity
/// `a` to offset extremity `b`, oriented with the sign of `distance`.
///
/// Returns `None` when the angular span degenerates.
pub(crate) fn junction_arc(
    vertex: &Point2,
    a: &Point2,
    b: &Point2,
    distance: f64,
) -> Result<Option<Arc>> {
    let va = a - vertex;
    let vb = b - vertex;
    let theta1 = va.y.atan2(va.x);
    let theta2 = vb.y.atan2(vb.x);

    if wrap_to_pi(theta2 - theta1).abs() < ANGLE_EPS {
        return Ok(None);
    }
    let span = (theta2 - theta1).rem_euclid(2.0 * PI);
    // The arc runs with the offset side: clockwise for a left offset,
    // counter-clockwise for a right offset.
    let sweep = if distance > 0.0 { span - 2.0 * PI } else { span };
    Ok(Some(Arc::new(*vertex, distance.abs(), theta1, sweep)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::math::{Point2, Vector2};

    fn square() -> Curve {
        Curve::Chain(
            Chain::from_points(
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(10.0, 0.0),
                    Point2::new(10.0, 10.0),
                    Point2::new(0.0, 10.0),
                ],
                true,
            )
            .unwrap(),
        )
    }

    #[test]
    fn zero_distance_is_identity() {
        let sq = square();
        let out = ParallelCurve::new(sq.clone(), 0.0).execute().unwrap();
        assert_eq!(out, sq);
    }

    #[test]
    fn line_offsets_to_parallel_line() {
        let l = Curve::Single(Element::Line(
            Line::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).unwrap(),
        ));
        let out = ParallelCurve::new(l, 2.0).execute().unwrap();
        match out {
            Curve::Single(Element::Line(l)) => {
                assert!((l.origin().y - 2.0).abs() < 1e-12);
                assert!((l.direction().x - 1.0).abs() < 1e-12);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn ccw_arc_left_offset_shrinks_radius() {
        let a = Curve::Single(Element::Arc(
            Arc::new(Point2::new(0.0, 0.0), 2.0, 0.0, PI).unwrap(),
        ));
        let out = ParallelCurve::new(a, 0.5).execute().unwrap();
        match out {
            Curve::Single(Element::Arc(a)) => assert!((a.radius - 1.5).abs() < 1e-12),
            other => panic!("expected an arc, got {other:?}"),
        }
    }

    #[test]
    fn arc_offset_through_center_inverts() {
        let a = Curve::Single(Element::Arc(
            Arc::new(Point2::new(0.0, 0.0), 2.0, 0.0, PI).unwrap(),
        ));
        let out = ParallelCurve::new(a, 3.0).execute().unwrap();
        match out {
            Curve::Single(Element::Arc(a)) => {
                assert!((a.radius - 1.0).abs() < 1e-12);
                let p = a.point(0.0);
                assert!((p.x + 1.0).abs() < 1e-9 && p.y.abs() < 1e-9);
            }
            other => panic!("expected an arc, got {other:?}"),
        }
    }

    #[test]
    fn arc_offset_onto_center_is_degenerate() {
        let a = Curve::Single(Element::Arc(
            Arc::new(Point2::new(0.0, 0.0), 2.0, 0.0, PI).unwrap(),
        ));
        assert!(ParallelCurve::new(a, 2.0).execute().is_err());
    }

    #[test]
    fn square_outer_offset_has_quarter_arc_corners() {
        // Right offset of a counter-clockwise square runs outside it.
        let out = ParallelCurve::new(square(), -1.0).execute().unwrap();
        assert!(out.is_closed());
        assert_eq!(out.pieces().len(), 8);
        // Perimeter plus one full turn of radius-one corner arcs.
        assert_relative_eq!(out.length().unwrap(), 40.0 + 2.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn open_corner_gets_a_salient_arc() {
        let c = Curve::Chain(
            Chain::from_points(
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(10.0, 0.0),
                    Point2::new(10.0, 10.0),
                ],
                false,
            )
            .unwrap(),
        );
        let out = ParallelCurve::new(c, -1.0).execute().unwrap();
        assert_eq!(out.pieces().len(), 3);
        let first = out.first_point().unwrap();
        let last = out.last_point().unwrap();
        assert!((first - Point2::new(0.0, -1.0)).norm() < 1e-9);
        assert!((last - Point2::new(11.0, 10.0)).norm() < 1e-9);
        // The corner arc passes through the outer diagonal point.
        assert!(out
            .position(&Point2::new(10.0 + (0.5_f64).sqrt(), -(0.5_f64).sqrt()))
            .is_some());
    }

    #[test]
    fn tangent_continuous_join_needs_no_junction() {
        let seg = Element::Segment(Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        let arc =
            Element::Arc(Arc::new(Point2::new(1.0, 1.0), 1.0, -PI / 2.0, PI / 2.0).unwrap());
        assert_eq!(
            classify_junction(&seg, &arc, 0.5).unwrap(),
            JunctionKind::Flat
        );
        let chain = Curve::Chain(Chain::try_new(vec![seg, arc], false).unwrap());
        let out = ParallelCurve::new(chain, 0.5).execute().unwrap();
        assert_eq!(out.pieces().len(), 2);
    }

    #[test]
    fn junction_classification_by_side() {
        let a = Element::Segment(Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        let b = Element::Segment(Segment::new(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)));
        // Left turn: the left offset hugs the inside, the right offset
        // needs a bridge.
        assert_eq!(classify_junction(&a, &b, 1.0).unwrap(), JunctionKind::Reentrant);
        assert_eq!(classify_junction(&a, &b, -1.0).unwrap(), JunctionKind::Salient);
    }
}
