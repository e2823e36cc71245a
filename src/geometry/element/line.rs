use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, ACCURACY};

/// An infinite straight line.
///
/// Parametric form `P(t) = origin + t * direction` with `t` in `(-∞, ∞)`;
/// `direction` is kept unit length so `t` measures signed arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    origin: Point2,
    direction: Vector2,
}

impl Line {
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length direction.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < ACCURACY {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Constructor for callers that already hold a unit direction.
    pub(crate) fn from_unit(origin: Point2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Parameter of `p` if it lies on the line within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        let t = (p - self.origin).dot(&self.direction);
        ((p - self.point(t)).norm() < ACCURACY).then_some(t)
    }
}
