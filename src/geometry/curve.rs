//! The unified curve type: a single element or a polycurve chain.

use std::slice;

use crate::error::Result;
use crate::geometry::bbox::Box2;
use crate::geometry::chain::Chain;
use crate::geometry::element::{CurveDomain, Element};
use crate::math::{Point2, Vector2, PARAM_EPS};

/// A circulinear curve.
///
/// Either one primitive element (possibly unbounded) or a chain of
/// bounded elements. A chain curve is parameterized globally, with
/// element `i` covering `[i, i+1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Single(Element),
    Chain(Chain),
}

impl From<Element> for Curve {
    fn from(el: Element) -> Self {
        Self::Single(el)
    }
}

impl From<Chain> for Curve {
    fn from(chain: Chain) -> Self {
        Self::Chain(chain)
    }
}

impl Curve {
    /// The constituent elements in traversal order.
    #[must_use]
    pub fn pieces(&self) -> &[Element] {
        match self {
            Self::Single(el) => slice::from_ref(el),
            Self::Chain(chain) => chain.elements(),
        }
    }

    #[must_use]
    pub fn domain(&self) -> CurveDomain {
        match self {
            Self::Single(el) => el.domain(),
            Self::Chain(chain) => CurveDomain::new(0.0, chain.t_max()),
        }
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        match self {
            Self::Single(el) => el.is_bounded(),
            Self::Chain(_) => true,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Single(el) => el.is_closed(),
            Self::Chain(chain) => chain.is_closed(),
        }
    }

    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        match self {
            Self::Single(el) => el.point(t),
            Self::Chain(chain) => chain.point(t),
        }
    }

    /// Unit tangent at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` on a zero-length segment.
    pub fn tangent(&self, t: f64) -> Result<Vector2> {
        match self {
            Self::Single(el) => el.tangent(t),
            Self::Chain(chain) => chain.tangent(t),
        }
    }

    #[must_use]
    pub fn curvature(&self, t: f64) -> f64 {
        match self {
            Self::Single(el) => el.curvature(),
            Self::Chain(chain) => chain.curvature(t),
        }
    }

    /// First extremity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for an infinite line.
    pub fn first_point(&self) -> Result<Point2> {
        match self {
            Self::Single(el) => el.first_point(),
            Self::Chain(chain) => Ok(chain.first_point()),
        }
    }

    /// Last extremity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray or a line.
    pub fn last_point(&self) -> Result<Point2> {
        match self {
            Self::Single(el) => el.last_point(),
            Self::Chain(chain) => Ok(chain.last_point()),
        }
    }

    /// Parameter of `p` if it lies on the curve within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        match self {
            Self::Single(el) => el.position(p),
            Self::Chain(chain) => chain.position(p),
        }
    }

    /// Arc length.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for rays and lines.
    pub fn length(&self) -> Result<f64> {
        match self {
            Self::Single(el) => el.length(),
            Self::Chain(chain) => chain.length(),
        }
    }

    /// Minimum distance from `p` to the curve.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        match self {
            Self::Single(el) => el.distance(p),
            Self::Chain(chain) => chain.distance(p),
        }
    }

    /// Axis-aligned bounding box.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for rays and lines.
    pub fn bounding_box(&self) -> Result<Box2> {
        match self {
            Self::Single(el) => el.bounding_box(),
            Self::Chain(chain) => chain.bounding_box(),
        }
    }

    /// Same locus traversed in the opposite direction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray.
    pub fn reversed(&self) -> Result<Self> {
        match self {
            Self::Single(el) => Ok(Self::Single(el.reversed()?)),
            Self::Chain(chain) => Ok(Self::Chain(chain.reversed())),
        }
    }

    /// Portion of the curve over `[t0, t1]`.
    ///
    /// On a closed curve, `t1 < t0` wraps through the start point.
    /// Infinite bounds are honored on rays and lines.
    #[must_use]
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Single(el) => {
                if self.is_closed() && t1 < t0 - PARAM_EPS {
                    // Full-circle arc: wrap through the seam.
                    let span = t1 + 1.0 - t0;
                    Self::Single(el.sub_element(t0, t0 + span))
                } else {
                    Self::Single(el.clip_to(t0, t1))
                }
            }
            Self::Chain(chain) => Self::Chain(chain.sub_chain(t0, t1)),
        }
    }

    /// Proper intersections with another curve.
    ///
    /// Entries are `(point, t_self, t_other)` in the curves' global
    /// parameterizations.
    #[must_use]
    pub fn intersections_with(&self, other: &Self) -> Vec<(Point2, f64, f64)> {
        let mut out = Vec::new();
        for (i, ea) in self.pieces().iter().enumerate() {
            for (j, eb) in other.pieces().iter().enumerate() {
                for (p, ta, tb) in ea.intersections(eb) {
                    let ga = self.globalize(i, ta);
                    let gb = other.globalize(j, tb);
                    out.push((p, ga, gb));
                }
            }
        }
        out
    }

    /// Maps a piece-local parameter to the curve's global parameter.
    pub(crate) fn globalize(&self, piece: usize, local: f64) -> f64 {
        match self {
            Self::Single(_) => local,
            Self::Chain(_) => piece as f64 + local,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::geometry::element::{Arc, Segment};
    use crate::math::ACCURACY;
    use std::f64::consts::PI;

    #[test]
    fn full_circle_is_closed() {
        let c = Curve::Single(Element::Arc(
            Arc::full_circle(Point2::new(0.0, 0.0), 2.0).unwrap(),
        ));
        assert!(c.is_closed());
        assert_relative_eq!(c.length().unwrap(), 4.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn wrap_sub_curve_on_circle() {
        let c = Curve::Single(Element::Arc(
            Arc::full_circle(Point2::new(0.0, 0.0), 1.0).unwrap(),
        ));
        // From 3/4 around, through the seam, to 1/4: a half circle
        // through angle 0.
        let sub = c.sub_curve(0.75, 0.25);
        assert_relative_eq!(sub.length().unwrap(), PI, epsilon = 1e-12);
        let p0 = sub.point(0.0);
        assert!(p0.x.abs() < 1e-12 && (p0.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn curve_curve_intersections_use_global_params() {
        let chain = Chain::from_points(
            &[
                Point2::new(0.0, -1.0),
                Point2::new(0.0, 1.0),
                Point2::new(4.0, 1.0),
            ],
            false,
        )
        .unwrap();
        let a = Curve::Chain(chain);
        let b = Curve::Single(Element::Segment(Segment::new(
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
        )));
        let hits = a.intersections_with(&b);
        assert_eq!(hits.len(), 1);
        let (p, ta, tb) = hits[0];
        assert!((p.x - 2.0).abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12);
        assert!((ta - 1.5).abs() < 1e-12);
        assert!((tb - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_sub_curve_keeps_a_point() {
        let c = Curve::Chain(
            Chain::from_points(
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(10.0, 0.0),
                    Point2::new(10.0, 5.0),
                ],
                false,
            )
            .unwrap(),
        );
        let sub = c.sub_curve(1.0, 1.0);
        let p = sub.point(0.0);
        assert!((p.x - 10.0).abs() < 1e-12 && p.y.abs() < 1e-12);
    }

    #[test]
    fn single_curve_distance_and_position() {
        let c = Curve::Single(Element::Segment(Segment::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        )));
        assert!((c.distance(&Point2::new(5.0, 3.0)) - 3.0).abs() < ACCURACY);
        assert!((c.position(&Point2::new(2.5, 0.0)).unwrap() - 0.25).abs() < 1e-12);
    }
}
