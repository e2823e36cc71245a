//! Primitive curve elements: segments, rays, lines, and circular arcs.
//!
//! [`Element`] unifies the four primitives behind one parametric
//! interface so chains and operations can treat them uniformly. All
//! pairwise intersections reduce to the three span cases in
//! [`crate::math::intersect_2d`].

pub mod arc;
pub mod line;
pub mod ray;
pub mod segment;

pub use arc::Arc;
pub use line::Line;
pub use ray::Ray;
pub use segment::Segment;

use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::geometry::bbox::Box2;
use crate::math::angle::angle_to_arc_param;
use crate::math::distance_2d::{
    point_to_arc_dist, point_to_line_dist, point_to_ray_dist, point_to_segment_dist,
};
use crate::math::intersect_2d::{
    circle_circle, linear_circle, linear_linear, CircleSpan, LinearSpan,
};
use crate::math::{Point2, Vector2};

/// Parameter interval of a curve; either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    pub t_min: f64,
    pub t_max: f64,
}

impl CurveDomain {
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite()
    }
}

/// A primitive curve piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Segment(Segment),
    Ray(Ray),
    Line(Line),
    Arc(Arc),
}

impl Element {
    /// Point at parameter `t`.
    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        match self {
            Self::Segment(s) => s.point(t),
            Self::Ray(r) => r.point(t),
            Self::Line(l) => l.point(t),
            Self::Arc(a) => a.point(t),
        }
    }

    /// Unit tangent in the direction of increasing `t`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn tangent(&self, t: f64) -> Result<Vector2> {
        match self {
            Self::Segment(s) => s.direction(),
            Self::Ray(r) => Ok(*r.direction()),
            Self::Line(l) => Ok(*l.direction()),
            Self::Arc(a) => Ok(a.tangent(t)),
        }
    }

    /// Signed curvature; zero for all straight elements.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        match self {
            Self::Segment(_) | Self::Ray(_) | Self::Line(_) => 0.0,
            Self::Arc(a) => a.curvature(),
        }
    }

    /// First extremity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for an infinite line.
    pub fn first_point(&self) -> Result<Point2> {
        match self {
            Self::Segment(s) => Ok(s.start),
            Self::Ray(r) => Ok(*r.origin()),
            Self::Line(_) => Err(GeometryError::UnboundedShape {
                what: "first point of a line",
            }
            .into()),
            Self::Arc(a) => Ok(a.point(0.0)),
        }
    }

    /// Last extremity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray or a line.
    pub fn last_point(&self) -> Result<Point2> {
        match self {
            Self::Segment(s) => Ok(s.end),
            Self::Ray(_) => Err(GeometryError::UnboundedShape {
                what: "last point of a ray",
            }
            .into()),
            Self::Line(_) => Err(GeometryError::UnboundedShape {
                what: "last point of a line",
            }
            .into()),
            Self::Arc(a) => Ok(a.point(1.0)),
        }
    }

    /// Same locus with opposite orientation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray, whose reverse
    /// (a half-line arriving from infinity) is not representable.
    pub fn reversed(&self) -> Result<Self> {
        match self {
            Self::Segment(s) => Ok(Self::Segment(s.reversed())),
            Self::Ray(_) => Err(GeometryError::UnboundedShape {
                what: "reverse of a ray",
            }
            .into()),
            Self::Line(l) => Ok(Self::Line(Line::from_unit(
                *l.origin(),
                -*l.direction(),
            ))),
            Self::Arc(a) => Ok(Self::Arc(a.reversed())),
        }
    }

    /// Bounded sub-element over `[t0, t1]`; both parameters must be
    /// finite. Rays and lines chop to a segment.
    #[must_use]
    pub fn sub_element(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Segment(s) => Self::Segment(s.sub_segment(t0, t1)),
            Self::Arc(a) => Self::Arc(a.sub_arc(t0, t1)),
            Self::Ray(_) | Self::Line(_) => {
                Self::Segment(Segment::new(self.point(t0), self.point(t1)))
            }
        }
    }

    /// Sub-element over `[t0, t1]` where either bound may be infinite.
    ///
    /// An unbounded interval on a ray keeps a ray; on a line it yields
    /// a ray oriented consistently with the line, or the line itself
    /// when both bounds are infinite.
    #[must_use]
    pub fn clip_to(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Ray(r) if t1.is_infinite() => Self::Ray(Ray::from_unit(
                r.point(t0.max(0.0)),
                *r.direction(),
            )),
            Self::Line(l) if t0.is_infinite() && t1.is_infinite() => Self::Line(*l),
            Self::Line(l) if t0.is_infinite() => {
                // (-inf, t1]: a ray walking backwards along the line.
                Self::Ray(Ray::from_unit(l.point(t1), -*l.direction()))
            }
            Self::Line(l) if t1.is_infinite() => {
                Self::Ray(Ray::from_unit(l.point(t0), *l.direction()))
            }
            _ => self.sub_element(t0, t1),
        }
    }

    /// Parameter of `p` if it lies on the element within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        match self {
            Self::Segment(s) => s.position(p),
            Self::Ray(r) => r.position(p),
            Self::Line(l) => l.position(p),
            Self::Arc(a) => a.position(p),
        }
    }

    #[must_use]
    pub fn domain(&self) -> CurveDomain {
        match self {
            Self::Segment(_) | Self::Arc(_) => CurveDomain::new(0.0, 1.0),
            Self::Ray(_) => CurveDomain::new(0.0, f64::INFINITY),
            Self::Line(_) => CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Segment(_) | Self::Arc(_))
    }

    /// True only for full-circle arcs.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Arc(a) if a.is_full_circle())
    }

    /// Arc length.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray or a line.
    pub fn length(&self) -> Result<f64> {
        match self {
            Self::Segment(s) => Ok(s.length()),
            Self::Arc(a) => Ok(a.length()),
            Self::Ray(_) => Err(GeometryError::UnboundedShape {
                what: "length of a ray",
            }
            .into()),
            Self::Line(_) => Err(GeometryError::UnboundedShape {
                what: "length of a line",
            }
            .into()),
        }
    }

    /// Minimum distance from `p` to the element.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        match self {
            Self::Segment(s) => point_to_segment_dist(p, &s.start, &s.end),
            Self::Ray(r) => point_to_ray_dist(p, r.origin(), r.direction()),
            Self::Line(l) => point_to_line_dist(p, l.origin(), l.direction()),
            Self::Arc(a) => point_to_arc_dist(p, &a.center, a.radius, a.start_angle, a.sweep),
        }
    }

    /// Axis-aligned bounding box.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnboundedShape` for a ray or a line.
    pub fn bounding_box(&self) -> Result<Box2> {
        match self {
            Self::Segment(s) => Ok(Box2::of_points(&[s.start, s.end])),
            Self::Arc(a) => {
                let mut points = vec![a.point(0.0), a.point(1.0)];
                // Cardinal directions reached by the sweep bound the box.
                for k in 0..4 {
                    let cardinal = f64::from(k) * FRAC_PI_2;
                    if angle_to_arc_param(cardinal, a.start_angle, a.sweep).is_some() {
                        points.push(
                            a.center + Vector2::new(cardinal.cos(), cardinal.sin()) * a.radius,
                        );
                    }
                }
                Ok(Box2::of_points(&points))
            }
            Self::Ray(_) => Err(GeometryError::UnboundedShape {
                what: "bounding box of a ray",
            }
            .into()),
            Self::Line(_) => Err(GeometryError::UnboundedShape {
                what: "bounding box of a line",
            }
            .into()),
        }
    }

    fn linear_span(&self) -> Option<LinearSpan> {
        match self {
            Self::Segment(s) => Some(LinearSpan {
                origin: s.start,
                dir: s.end - s.start,
                lo: 0.0,
                hi: 1.0,
            }),
            Self::Ray(r) => Some(LinearSpan {
                origin: *r.origin(),
                dir: *r.direction(),
                lo: 0.0,
                hi: f64::INFINITY,
            }),
            Self::Line(l) => Some(LinearSpan {
                origin: *l.origin(),
                dir: *l.direction(),
                lo: f64::NEG_INFINITY,
                hi: f64::INFINITY,
            }),
            Self::Arc(_) => None,
        }
    }

    fn circle_span(&self) -> Option<CircleSpan> {
        match self {
            Self::Arc(a) => Some(CircleSpan {
                center: a.center,
                radius: a.radius,
                start_angle: a.start_angle,
                sweep: a.sweep,
            }),
            _ => None,
        }
    }

    /// Proper intersections with another element.
    ///
    /// Each entry is `(point, t_self, t_other)` in the elements' own
    /// parameterizations. Overlapping collinear or cocircular loci
    /// yield no entries.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<(Point2, f64, f64)> {
        match (self.circle_span(), other.circle_span()) {
            (None, None) => {
                // Both linear; spans always exist here.
                match (self.linear_span(), other.linear_span()) {
                    (Some(a), Some(b)) => linear_linear(&a, &b),
                    _ => Vec::new(),
                }
            }
            (None, Some(c)) => match self.linear_span() {
                Some(l) => linear_circle(&l, &c),
                None => Vec::new(),
            },
            (Some(c), None) => match other.linear_span() {
                Some(l) => linear_circle(&l, &c)
                    .into_iter()
                    .map(|(p, t_l, t_c)| (p, t_c, t_l))
                    .collect(),
                None => Vec::new(),
            },
            (Some(a), Some(b)) => circle_circle(&a, &b),
        }
    }
}
