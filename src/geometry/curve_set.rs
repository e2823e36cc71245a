//! Ordered collections of disjoint curves.

use crate::geometry::curve::Curve;
use crate::math::Point2;

/// Sentinel offset standing in for an infinite parameter bound when a
/// concrete sample point is needed.
const UNBOUNDED_OFFSET: f64 = 10.0;

/// Maps a possibly-infinite domain bound pair to finite sample bounds.
pub(crate) fn finite_bounds(t_min: f64, t_max: f64) -> (f64, f64) {
    let lo = if t_min.is_finite() {
        t_min
    } else if t_max.is_finite() {
        t_max - UNBOUNDED_OFFSET
    } else {
        -UNBOUNDED_OFFSET
    };
    let hi = if t_max.is_finite() {
        t_max
    } else if t_min.is_finite() {
        t_min + UNBOUNDED_OFFSET
    } else {
        UNBOUNDED_OFFSET
    };
    (lo, hi)
}

/// An ordered, duplicate-free collection of curves.
///
/// The set carries its own global parameterization over `[0, 2N-1]`:
/// member `k` owns `[2k, 2k+1]`, and the gaps `(2k+1, 2k+2)` resolve
/// to the nearer neighbor. The even spacing keeps touching extremities
/// of distinct members distinguishable as positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSet {
    curves: Vec<Curve>,
}

impl CurveSet {
    #[must_use]
    pub fn new() -> Self {
        Self { curves: Vec::new() }
    }

    #[must_use]
    pub fn from_curves(curves: Vec<Curve>) -> Self {
        let mut set = Self::new();
        for c in curves {
            set.push(c);
        }
        set
    }

    /// Appends a curve unless an equal one is already present.
    pub fn push(&mut self, curve: Curve) {
        if !self.curves.contains(&curve) {
            self.curves.push(curve);
        }
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Member index owning global position `t`.
    ///
    /// Positions in a gap `(2k+1, 2k+2)` resolve to the left member
    /// below `2k + 1.5` and to the right member above it.
    #[must_use]
    pub fn curve_index(&self, t: f64) -> usize {
        if self.curves.is_empty() {
            return 0;
        }
        let k = ((t + 0.5) / 2.0).floor().max(0.0) as usize;
        k.min(self.curves.len() - 1)
    }

    /// Point at global position `t`.
    ///
    /// Infinite member domains are sampled at a finite sentinel offset.
    #[must_use]
    pub fn point(&self, t: f64) -> Option<Point2> {
        if self.curves.is_empty() {
            return None;
        }
        let k = self.curve_index(t);
        let curve = &self.curves[k];
        let s = (t - 2.0 * k as f64).clamp(0.0, 1.0);
        let d = curve.domain();
        let (lo, hi) = finite_bounds(d.t_min, d.t_max);
        Some(curve.point(lo + s * (hi - lo)))
    }

    /// Global position of `p` if it lies on a member curve.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        for (k, curve) in self.curves.iter().enumerate() {
            if let Some(local) = curve.position(p) {
                let d = curve.domain();
                let (lo, hi) = finite_bounds(d.t_min, d.t_max);
                let s = if hi > lo {
                    ((local - lo) / (hi - lo)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return Some(2.0 * k as f64 + s);
            }
        }
        None
    }
}

impl IntoIterator for CurveSet {
    type Item = Curve;
    type IntoIter = std::vec::IntoIter<Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::element::{Element, Segment};

    fn seg(x0: f64, x1: f64) -> Curve {
        Curve::Single(Element::Segment(Segment::new(
            Point2::new(x0, 0.0),
            Point2::new(x1, 0.0),
        )))
    }

    #[test]
    fn duplicates_are_dropped() {
        let mut set = CurveSet::new();
        set.push(seg(0.0, 1.0));
        set.push(seg(0.0, 1.0));
        set.push(seg(2.0, 3.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn gap_positions_resolve_to_nearer_member() {
        let set = CurveSet::from_curves(vec![seg(0.0, 1.0), seg(2.0, 3.0)]);
        assert_eq!(set.curve_index(0.5), 0);
        assert_eq!(set.curve_index(1.4), 0);
        assert_eq!(set.curve_index(1.6), 1);
        assert_eq!(set.curve_index(2.5), 1);
    }

    #[test]
    fn touching_extremities_stay_distinguishable() {
        // Two segments meeting at x = 1: the shared point reports the
        // first member's position, but the second member's start still
        // has its own distinct global position (2.0).
        let set = CurveSet::from_curves(vec![seg(0.0, 1.0), seg(1.0, 2.0)]);
        let t = set.position(&Point2::new(1.0, 0.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-9);
        let p = set.point(2.0).unwrap();
        assert!((p.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn point_at_global_position() {
        let set = CurveSet::from_curves(vec![seg(0.0, 1.0), seg(2.0, 4.0)]);
        let p = set.point(2.5).unwrap();
        assert!((p.x - 3.0).abs() < 1e-12);
    }
}
