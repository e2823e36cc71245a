//! Angle normalization and arc sweep containment.
//!
//! Sweep convention: a signed angular extent in `[-2π, 2π]`; positive
//! sweeps run counter-clockwise. An arc covers the angles
//! `start_angle + sweep * t` for `t` in `[0, 1]`.

use std::f64::consts::PI;

/// Slack used when testing whether an angle falls inside a sweep.
///
/// Angles come out of `atan2` on computed intersection points, so they
/// carry a couple orders of magnitude more noise than raw coordinates.
pub const ANGLE_EPS: f64 = 1e-9;

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut a = angle % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    a
}

/// Wraps an angle difference into `(-π, π]`.
#[must_use]
pub fn wrap_to_pi(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut a = angle % two_pi;
    if a > PI {
        a -= two_pi;
    } else if a <= -PI {
        a += two_pi;
    }
    a
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    let two_pi = 2.0 * PI;
    if sweep.abs() < ANGLE_EPS {
        return None;
    }

    // Angular offset from start_angle, unwound in the sweep direction.
    let mut delta = angle - start_angle;
    if sweep > 0.0 {
        while delta < -ANGLE_EPS {
            delta += two_pi;
        }
        while delta > two_pi + ANGLE_EPS {
            delta -= two_pi;
        }
    } else {
        while delta > ANGLE_EPS {
            delta -= two_pi;
        }
        while delta < -two_pi - ANGLE_EPS {
            delta += two_pi;
        }
    }

    let t = delta / sweep;
    if (-ANGLE_EPS..=1.0 + ANGLE_EPS).contains(&t) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalize_negative() {
        let a = normalize_angle(-PI / 2.0);
        assert!((a - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn wrap_large_positive() {
        let a = wrap_to_pi(1.5 * PI);
        assert!((a + 0.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn param_inside_ccw_sweep() {
        // Quarter arc from 0 to π/2; π/4 sits at t = 0.5.
        let t = angle_to_arc_param(PI / 4.0, 0.0, PI / 2.0).unwrap();
        assert!((t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn param_outside_sweep() {
        assert!(angle_to_arc_param(PI, 0.0, PI / 2.0).is_none());
    }

    #[test]
    fn param_inside_cw_sweep() {
        // Clockwise quarter arc from π/2 down to 0.
        let t = angle_to_arc_param(PI / 4.0, PI / 2.0, -PI / 2.0).unwrap();
        assert!((t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn param_full_circle_contains_everything() {
        let t = angle_to_arc_param(-2.0, 0.0, 2.0 * PI).unwrap();
        assert!(t > 0.0 && t < 1.0);
    }
}
