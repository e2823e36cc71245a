//! Buffer regions: all points within a distance of a curve.

use crate::error::{ArclineError, GeometryError, OperationError, Result};
use crate::geometry::{Chain, Curve, Element, Ray};
use crate::math::{left_normal, ACCURACY};
use crate::operations::contour_split::SplitContours;
use crate::operations::parallel::{element_parallel, junction_arc, ParallelCurve};
use crate::operations::split_self::SplitCurve;

/// Tolerance for the "no closer than the buffer distance" ring check.
const DIST_SLACK: f64 = 1e-9;

/// A region bounded by disjoint, simple, closed contours.
///
/// For an unbounded source curve the contours may themselves be
/// unbounded (rays and lines), in which case they come in matched
/// open pairs rather than rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    contours: Vec<Curve>,
}

impl Domain {
    #[must_use]
    pub fn contours(&self) -> &[Curve] {
        &self.contours
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Computes the buffer of a curve: the boundary of the set of all
/// points within `distance` of it.
///
/// The pipeline works per simple sub-curve: both side offsets are
/// computed, split at their self-intersections, folded-over fragments
/// are discarded, the survivors are closed with circular end caps, and
/// the resulting rings are rewired at mutual crossings. A ring only
/// survives if none of its points comes closer than `distance` to the
/// source.
#[derive(Debug)]
pub struct CurveBuffer {
    curve: Curve,
    distance: f64,
}

impl CurveBuffer {
    /// Creates a new buffer operation.
    #[must_use]
    pub fn new(curve: Curve, distance: f64) -> Self {
        Self { curve, distance }
    }

    /// Executes the buffer computation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive
    /// distance and `OperationError::AssemblyInvariant` when the offset
    /// fragments cannot be stitched into rings.
    pub fn execute(&self) -> Result<Domain> {
        if self.distance < ACCURACY {
            return Err(
                OperationError::InvalidInput("buffer distance must be positive".into()).into(),
            );
        }

        if let Curve::Single(el) = &self.curve {
            match el {
                Element::Line(_) => return self.line_buffer(el),
                Element::Ray(r) => return self.ray_buffer(r),
                _ => {}
            }
        }

        let parts = SplitCurve::new(self.curve.clone()).execute()?;
        let mut rings: Vec<Curve> = Vec::new();
        for part in &parts {
            self.buffer_part(part, &mut rings)?;
        }

        // Rings from different parts (or opposite sides) may cross each
        // other; rewire them and keep only pieces that respect the
        // distance to the whole source.
        let contours = SplitContours::new(rings).execute()?;
        let contours = contours
            .into_iter()
            .filter(|c| self.ring_is_valid(c, &self.curve))
            .collect();
        Ok(Domain { contours })
    }

    /// Both boundaries of a line buffer are parallel lines.
    fn line_buffer(&self, line: &Element) -> Result<Domain> {
        let left = element_parallel(line, self.distance)?;
        let right = element_parallel(line, -self.distance)?.reversed()?;
        Ok(Domain {
            contours: vec![Curve::Single(left), Curve::Single(right)],
        })
    }

    /// A ray buffer has two parallel rays plus a cap arc around the
    /// ray's origin; the three pieces stay separate open contours.
    fn ray_buffer(&self, ray: &Ray) -> Result<Domain> {
        let shift = left_normal(*ray.direction()) * self.distance;
        let left = Element::Ray(Ray::from_unit(ray.origin() + shift, *ray.direction()));
        let right = Element::Ray(Ray::from_unit(ray.origin() - shift, *ray.direction()));
        let a = ray.origin() - shift;
        let b = ray.origin() + shift;
        let Some(cap) = junction_arc(ray.origin(), &a, &b, self.distance)? else {
            return Err(OperationError::AssemblyInvariant("degenerate ray cap".into()).into());
        };
        Ok(Domain {
            contours: vec![
                Curve::Single(left),
                Curve::Single(right),
                Curve::Single(Element::Arc(cap)),
            ],
        })
    }

    /// Buffers one simple sub-curve, appending its candidate rings.
    fn buffer_part(&self, part: &Curve, rings: &mut Vec<Curve>) -> Result<()> {
        let left = match ParallelCurve::new(part.clone(), self.distance).execute() {
            Ok(c) => Some(c),
            Err(ArclineError::Geometry(GeometryError::Degenerate(_))) => None,
            Err(e) => return Err(e),
        };
        let right = match ParallelCurve::new(part.clone(), -self.distance).execute() {
            Ok(c) => Some(c.reversed()?),
            Err(ArclineError::Geometry(GeometryError::Degenerate(_))) => None,
            Err(e) => return Err(e),
        };

        let candidates = if part.is_closed() {
            let mut out = Vec::new();
            for side in [left, right].into_iter().flatten() {
                for frag in SplitCurve::new(side).execute()? {
                    if frag.is_closed() && frag.intersections_with(part).is_empty() {
                        out.push(frag);
                    }
                }
            }
            out
        } else {
            let (Some(left), Some(right)) = (left, right) else {
                return Err(OperationError::AssemblyInvariant(
                    "offset side collapsed on an open curve".into(),
                )
                .into());
            };
            self.close_open_offsets(part, left, right)?
        };

        // Stitched rings can self-intersect in turn; split them once
        // more before validation.
        for ring in candidates {
            for simple in SplitCurve::new(ring).execute()? {
                if simple.is_closed() && self.ring_is_valid(&simple, part) {
                    rings.push(simple);
                }
            }
        }
        Ok(())
    }

    /// Splits both side offsets of an open sub-curve, discards folds,
    /// and joins the two surviving open fragments with end caps.
    fn close_open_offsets(
        &self,
        part: &Curve,
        left: Curve,
        right: Curve,
    ) -> Result<Vec<Curve>> {
        let mut out = Vec::new();
        let mut open_left = Vec::new();
        let mut open_right = Vec::new();
        for (side, open) in [(left, &mut open_left), (right, &mut open_right)] {
            for frag in SplitCurve::new(side).execute()? {
                if !frag.intersections_with(part).is_empty() {
                    continue;
                }
                if frag.is_closed() {
                    out.push(frag);
                } else {
                    open.push(frag);
                }
            }
        }
        let ([fl], [fr]) = (&open_left[..], &open_right[..]) else {
            return Err(OperationError::AssemblyInvariant(
                "expected exactly two open offset fragments".into(),
            )
            .into());
        };

        let src_start = part.first_point()?;
        let src_end = part.last_point()?;
        let Some(end_cap) =
            junction_arc(&src_end, &fl.last_point()?, &fr.first_point()?, self.distance)?
        else {
            return Err(OperationError::AssemblyInvariant("degenerate end cap".into()).into());
        };
        let Some(start_cap) =
            junction_arc(&src_start, &fr.last_point()?, &fl.first_point()?, self.distance)?
        else {
            return Err(OperationError::AssemblyInvariant("degenerate start cap".into()).into());
        };

        let mut pieces: Vec<Element> = Vec::new();
        pieces.extend_from_slice(fl.pieces());
        pieces.push(Element::Arc(end_cap));
        pieces.extend_from_slice(fr.pieces());
        pieces.push(Element::Arc(start_cap));
        out.push(Curve::Chain(Chain::new(pieces, true)));
        Ok(out)
    }

    /// A ring is valid when it keeps its distance to `source` and does
    /// not cross it.
    fn ring_is_valid(&self, ring: &Curve, source: &Curve) -> bool {
        for piece in ring.pieces() {
            for t in [0.0, 0.5, 1.0] {
                if source.distance(&piece.point(t)) < self.distance - DIST_SLACK {
                    return false;
                }
            }
        }
        ring.intersections_with(source).is_empty()
    }
}
