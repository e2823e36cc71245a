pub mod angle;
pub mod distance_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Every equality, tangency, and degeneracy test in the kernel goes
/// through this one constant.
pub const ACCURACY: f64 = 1e-12;

/// Slack for parameter-space comparisons.
///
/// Curve parameters are derived quantities; they carry more rounding
/// noise than raw coordinates, so parameter tests are two orders
/// looser than [`ACCURACY`].
pub const PARAM_EPS: f64 = ACCURACY * 100.0;

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Cross product z-component of two 2D vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_normal_of_x_axis_points_up() {
        let n = left_normal(Vector2::new(1.0, 0.0));
        assert!(n.x.abs() < ACCURACY);
        assert!((n.y - 1.0).abs() < ACCURACY);
    }

    #[test]
    fn cross_of_axes() {
        let z = cross_2d(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 1.0));
        assert!((z - 1.0).abs() < ACCURACY);
    }
}
