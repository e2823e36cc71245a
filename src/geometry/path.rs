//! Flattening curves into drawing commands.

use crate::error::{GeometryError, Result};
use crate::geometry::curve::Curve;
use crate::geometry::element::Element;
use crate::math::Point2;

/// A drawing command, in the usual move/line/arc vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point2),
    LineTo(Point2),
    /// Circular arc from the current point to the arc's end point.
    ArcTo {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    Close,
}

/// Appends the drawing commands of `curve` to `path`.
///
/// # Errors
///
/// Returns `GeometryError::UnboundedShape` when the curve contains a
/// ray or a line; only bounded curves can be drawn.
pub fn append_path(curve: &Curve, path: &mut Vec<PathElement>) -> Result<()> {
    if !curve.is_bounded() {
        return Err(GeometryError::UnboundedShape {
            what: "path of an unbounded curve",
        }
        .into());
    }

    path.push(PathElement::MoveTo(curve.first_point()?));
    for el in curve.pieces() {
        match el {
            Element::Segment(s) => path.push(PathElement::LineTo(s.end)),
            Element::Arc(a) => path.push(PathElement::ArcTo {
                center: a.center,
                radius: a.radius,
                start_angle: a.start_angle,
                sweep: a.sweep,
            }),
            // Unreachable for a bounded curve.
            Element::Ray(_) | Element::Line(_) => {}
        }
    }
    if curve.is_closed() {
        path.push(PathElement::Close);
    }
    Ok(())
}

/// The drawing commands of `curve`.
///
/// # Errors
///
/// Same conditions as [`append_path`].
pub fn curve_path(curve: &Curve) -> Result<Vec<PathElement>> {
    let mut path = Vec::new();
    append_path(curve, &mut path)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::chain::Chain;
    use crate::geometry::element::{Line, Ray, Segment};
    use crate::math::Vector2;

    #[test]
    fn closed_polygon_emits_close() {
        let c = Chain::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            true,
        )
        .unwrap();
        let path = curve_path(&Curve::Chain(c)).unwrap();
        assert_eq!(path.len(), 5);
        assert!(matches!(path[0], PathElement::MoveTo(_)));
        assert!(matches!(path[4], PathElement::Close));
    }

    #[test]
    fn unbounded_curves_are_rejected() {
        let ray = Curve::Single(Element::Ray(
            Ray::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).unwrap(),
        ));
        assert!(curve_path(&ray).is_err());
        let line = Curve::Single(Element::Line(
            Line::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).unwrap(),
        ));
        assert!(curve_path(&line).is_err());
    }

    #[test]
    fn open_segment_path() {
        let c = Curve::Single(Element::Segment(Segment::new(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
        )));
        let path = curve_path(&c).unwrap();
        assert_eq!(
            path,
            vec![
                PathElement::MoveTo(Point2::new(0.0, 0.0)),
                PathElement::LineTo(Point2::new(2.0, 0.0)),
            ]
        );
    }
}
