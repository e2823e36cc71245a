use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, ACCURACY};

/// A bounded straight piece from `start` to `end`.
///
/// Parametric form `P(t) = start + t * (end - start)` with `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    /// Unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn direction(&self) -> Result<Vector2> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < ACCURACY {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Parameter of `p` if it lies on the segment within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        let d = self.end - self.start;
        let len_sq = d.norm_squared();
        if len_sq < ACCURACY * ACCURACY {
            return ((p - self.start).norm() < ACCURACY).then_some(0.0);
        }
        let t = (p - self.start).dot(&d) / len_sq;
        let t = t.clamp(0.0, 1.0);
        ((p - self.point(t)).norm() < ACCURACY).then_some(t)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Sub-segment covering the parameter range `[t0, t1]`.
    #[must_use]
    pub fn sub_segment(&self, t0: f64, t1: f64) -> Self {
        Self {
            start: self.point(t0),
            end: self.point(t1),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_interpolates() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let p = s.point(0.25);
        assert!((p.x - 2.5).abs() < ACCURACY);
        assert!(p.y.abs() < ACCURACY);
    }

    #[test]
    fn position_roundtrip() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0));
        let t = s.position(&Point2::new(3.0, 3.0)).unwrap();
        assert!((t - 0.75).abs() < 1e-12);
    }

    #[test]
    fn position_off_segment_is_none() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        assert!(s.position(&Point2::new(2.0, 0.5)).is_none());
        assert!(s.position(&Point2::new(5.0, 0.0)).is_none());
    }

    #[test]
    fn sub_segment_of_middle() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let sub = s.sub_segment(0.2, 0.6);
        assert!((sub.start.x - 2.0).abs() < ACCURACY);
        assert!((sub.end.x - 6.0).abs() < ACCURACY);
    }

    #[test]
    fn zero_length_direction_errors() {
        let s = Segment::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(s.direction().is_err());
    }
}
