//! Polycurves: continuous sequences of bounded elements.

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::bbox::Box2;
use crate::geometry::element::{Element, Segment};
use crate::math::{Point2, Vector2, ACCURACY, PARAM_EPS};

/// Endpoint tolerance for chain continuity checks.
///
/// Joins come out of offset and splitting arithmetic, so they are
/// looser than raw coordinate comparisons.
const JOIN_EPS: f64 = 1e-9;

/// A continuous sequence of bounded elements (segments and arcs).
///
/// The chain is parameterized globally: element `i` covers `[i, i+1]`
/// and the whole chain covers `[0, n]`. A closed chain additionally
/// joins its last element back to its first.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    elements: Vec<Element>,
    closed: bool,
}

impl Chain {
    /// Builds a chain, validating boundedness and continuity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Discontinuous` when consecutive elements
    /// (or, for a closed chain, the last and first) do not share an
    /// endpoint within tolerance, `OperationError::InvalidInput` for an
    /// empty element list, and `GeometryError::UnboundedShape` when an
    /// element is a ray or a line.
    pub fn try_new(elements: Vec<Element>, closed: bool) -> Result<Self> {
        if elements.is_empty() {
            return Err(OperationError::InvalidInput("empty chain".into()).into());
        }
        for el in &elements {
            if !el.is_bounded() {
                return Err(GeometryError::UnboundedShape {
                    what: "chain element",
                }
                .into());
            }
        }
        for i in 1..elements.len() {
            let gap = (elements[i].point(0.0) - elements[i - 1].point(1.0)).norm();
            if gap > JOIN_EPS {
                return Err(GeometryError::Discontinuous { index: i, gap }.into());
            }
        }
        if closed {
            let n = elements.len();
            let gap = (elements[0].point(0.0) - elements[n - 1].point(1.0)).norm();
            if gap > JOIN_EPS {
                return Err(GeometryError::Discontinuous { index: 0, gap }.into());
            }
        }
        Ok(Self { elements, closed })
    }

    /// Unchecked constructor for internal callers that build exact joins.
    pub(crate) fn new(elements: Vec<Element>, closed: bool) -> Self {
        debug_assert!(elements.iter().all(Element::is_bounded));
        Self { elements, closed }
    }

    /// Polyline through `points`, deduplicating consecutive repeats.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when fewer than two
    /// distinct points remain.
    pub fn from_points(points: &[Point2], closed: bool) -> Result<Self> {
        let mut distinct: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if distinct.last().map_or(true, |q| (p - q).norm() > ACCURACY) {
                distinct.push(*p);
            }
        }
        if closed
            && distinct.len() > 1
            && (distinct[0] - distinct[distinct.len() - 1]).norm() < ACCURACY
        {
            distinct.pop();
        }
        if distinct.len() < 2 {
            return Err(
                OperationError::InvalidInput("need at least two distinct points".into()).into(),
            );
        }

        let mut elements: Vec<Element> = distinct
            .windows(2)
            .map(|w| Element::Segment(Segment::new(w[0], w[1])))
            .collect();
        if closed {
            elements.push(Element::Segment(Segment::new(
                distinct[distinct.len() - 1],
                distinct[0],
            )));
        }
        Ok(Self { elements, closed })
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Upper parameter bound (the number of elements).
    #[must_use]
    pub fn t_max(&self) -> f64 {
        self.elements.len() as f64
    }

    /// Splits a global parameter into element index and local parameter.
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.elements.len();
        let i = (t.floor().max(0.0) as usize).min(n - 1);
        (i, (t - i as f64).clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        let (i, local) = self.locate(t);
        self.elements[i].point(local)
    }

    /// Unit tangent at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` when `t` falls on a
    /// zero-length segment.
    pub fn tangent(&self, t: f64) -> Result<Vector2> {
        let (i, local) = self.locate(t);
        self.elements[i].tangent(local)
    }

    #[must_use]
    pub fn curvature(&self, t: f64) -> f64 {
        let (i, _) = self.locate(t);
        self.elements[i].curvature()
    }

    #[must_use]
    pub fn first_point(&self) -> Point2 {
        self.point(0.0)
    }

    #[must_use]
    pub fn last_point(&self) -> Point2 {
        self.point(self.t_max())
    }

    /// Global parameter of `p` if it lies on the chain within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        for (i, el) in self.elements.iter().enumerate() {
            if let Some(local) = el.position(p) {
                return Some(i as f64 + local);
            }
        }
        None
    }

    /// Total arc length.
    ///
    /// # Errors
    ///
    /// Never fails for a valid chain; kept fallible for uniformity with
    /// unbounded curves.
    pub fn length(&self) -> Result<f64> {
        let mut total = 0.0;
        for el in &self.elements {
            total += el.length()?;
        }
        Ok(total)
    }

    /// Minimum distance from `p` to the chain.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        self.elements
            .iter()
            .map(|el| el.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned bounding box.
    ///
    /// # Errors
    ///
    /// Never fails for a valid chain.
    pub fn bounding_box(&self) -> Result<Box2> {
        let mut b: Option<Box2> = None;
        for el in &self.elements {
            let eb = el.bounding_box()?;
            b = Some(match b {
                Some(prev) => prev.union(&eb),
                None => eb,
            });
        }
        Ok(b.unwrap_or(Box2::new(0.0, 0.0, 0.0, 0.0)))
    }

    /// Chain traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let elements = self
            .elements
            .iter()
            .rev()
            // Bounded elements always reverse.
            .filter_map(|el| el.reversed().ok())
            .collect();
        Self {
            elements,
            closed: self.closed,
        }
    }

    /// Sub-chain over the global parameter range `[t0, t1]`.
    ///
    /// On a closed chain, `t1 < t0` wraps through the seam. A wrap that
    /// covers the full parameter span returns a closed chain.
    #[must_use]
    pub fn sub_chain(&self, t0: f64, t1: f64) -> Self {
        let n = self.elements.len();
        let nf = n as f64;
        let end = if self.closed && t1 < t0 - PARAM_EPS {
            t1 + nf
        } else {
            t1
        };

        let mut parts = Vec::new();
        let mut cur = t0;
        while end - cur > PARAM_EPS {
            let idx_f = cur.floor();
            let i = (idx_f.max(0.0) as usize) % n;
            let local0 = cur - idx_f;
            let local1 = (end - idx_f).min(1.0);
            if local1 - local0 > PARAM_EPS {
                parts.push(self.elements[i].sub_element(local0, local1));
            }
            cur = idx_f + 1.0;
        }
        if parts.is_empty() {
            // Degenerate range: keep a zero-length piece at t0 so the
            // result still has a well-defined point.
            let (i, local) = self.locate(t0);
            parts.push(self.elements[i].sub_element(local, local));
        }

        let full_span = (end - t0 - nf).abs() < PARAM_EPS;
        Self::new(parts, self.closed && full_span)
    }
}
