use crate::math::{Point2, ACCURACY};

/// An axis-aligned rectangle used as a clipping region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2 {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Box2 {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// True when `p` lies inside or on the boundary (within `ACCURACY`).
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.x_min - ACCURACY
            && p.x <= self.x_max + ACCURACY
            && p.y >= self.y_min - ACCURACY
            && p.y <= self.y_max + ACCURACY
    }

    /// True when `p` lies on the boundary within `ACCURACY`.
    #[must_use]
    pub fn on_boundary(&self, p: &Point2) -> bool {
        if !self.contains(p) {
            return false;
        }
        (p.x - self.x_min).abs() < ACCURACY
            || (p.x - self.x_max).abs() < ACCURACY
            || (p.y - self.y_min).abs() < ACCURACY
            || (p.y - self.y_max).abs() < ACCURACY
    }

    /// The four boundary corners in counter-clockwise order, starting
    /// at the minimum corner.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.x_min, self.y_min),
            Point2::new(self.x_max, self.y_min),
            Point2::new(self.x_max, self.y_max),
            Point2::new(self.x_min, self.y_max),
        ]
    }

    /// Smallest box containing both operands.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Smallest box containing a set of points.
    ///
    /// Returns a degenerate empty box when `points` is empty.
    #[must_use]
    pub fn of_points(points: &[Point2]) -> Self {
        let mut b = Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for p in points {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.y_min = b.y_min.min(p.y);
            b.y_max = b.y_max.max(p.y);
        }
        b
    }
}
