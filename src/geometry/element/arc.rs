use std::f64::consts::PI;

use crate::error::{GeometryError, Result};
use crate::math::angle::angle_to_arc_param;
use crate::math::{Point2, Vector2, ACCURACY};

/// A circular arc.
///
/// Covers the angles `start_angle + sweep * t` for `t` in `[0, 1]`.
/// `sweep` is signed (positive = counter-clockwise) with `|sweep| <= 2π`;
/// a full circle is an arc with `|sweep| = 2π`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Arc {
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < ACCURACY {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Full counter-clockwise circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius.
    pub fn full_circle(center: Point2, radius: f64) -> Result<Self> {
        Self::new(center, radius, 0.0, 2.0 * PI)
    }

    /// Absolute angle at parameter `t`.
    #[must_use]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sweep * t
    }

    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        let a = self.angle_at(t);
        self.center + Vector2::new(a.cos(), a.sin()) * self.radius
    }

    /// Unit tangent in the direction of increasing `t`.
    #[must_use]
    pub fn tangent(&self, t: f64) -> Vector2 {
        let a = self.angle_at(t);
        let sign = if self.sweep >= 0.0 { 1.0 } else { -1.0 };
        Vector2::new(-sign * a.sin(), sign * a.cos())
    }

    /// Signed curvature: `+1/r` counter-clockwise, `-1/r` clockwise.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        if self.sweep >= 0.0 {
            1.0 / self.radius
        } else {
            -1.0 / self.radius
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// True when the arc closes onto itself (full circle).
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        (self.sweep.abs() - 2.0 * PI).abs() < ACCURACY
    }

    /// Parameter of `p` if it lies on the arc within `ACCURACY`.
    #[must_use]
    pub fn position(&self, p: &Point2) -> Option<f64> {
        let v = p - self.center;
        if (v.norm() - self.radius).abs() > ACCURACY {
            return None;
        }
        angle_to_arc_param(v.y.atan2(v.x), self.start_angle, self.sweep)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle + self.sweep,
            sweep: -self.sweep,
        }
    }

    /// Sub-arc covering the parameter range `[t0, t1]`.
    #[must_use]
    pub fn sub_arc(&self, t0: f64, t1: f64) -> Self {
        Self {
            center: self.center,
            radius: self.radius,
            start_angle: self.angle_at(t0),
            sweep: self.sweep * (t1 - t0),
        }
    }
}
