//! Rewiring mutually intersecting closed contours into disjoint loops.

use std::collections::BTreeMap;

use crate::error::{OperationError, Result};
use crate::geometry::{Chain, Curve, Element};
use crate::math::{cross_2d, PARAM_EPS};
use crate::operations::positions::PositionTable;

/// Parameter step for sampling just before and after a candidate
/// crossing. Large enough that second-order contact still produces a
/// measurable side offset.
const SIDE_STEP: f64 = 1e-4;

/// Splits a family of closed contours that cross each other into
/// contours that do not.
///
/// At every mutual crossing the walk leaves one contour and continues
/// on the other, so each output loop is stitched from pieces of the
/// inputs and never crosses another output. Contours that intersect
/// nothing pass through unchanged.
#[derive(Debug)]
pub struct SplitContours {
    contours: Vec<Curve>,
}

impl SplitContours {
    /// Creates a new contour splitting operation.
    #[must_use]
    pub fn new(contours: Vec<Curve>) -> Self {
        Self { contours }
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when a contour is not
    /// closed, and `OperationError::AssemblyInvariant` when crossings
    /// coincide or a walk fails to close.
    pub fn execute(&self) -> Result<Vec<Curve>> {
        for c in &self.contours {
            if !c.is_closed() {
                return Err(
                    OperationError::InvalidInput("contour splitting needs closed curves".into())
                        .into(),
                );
            }
        }

        // Gather crossings per contour pair.
        let n = self.contours.len();
        let mut raw_positions: Vec<Vec<f64>> = vec![Vec::new(); n];
        let mut crossings: Vec<(usize, f64, usize, f64)> = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                for (_, ti, tj) in self.contours[i].intersections_with(&self.contours[j]) {
                    // A touch point leaves both walks on one side and
                    // must not become a switch point.
                    if !self.crosses(i, ti, j, tj) {
                        continue;
                    }
                    raw_positions[i].push(ti);
                    raw_positions[j].push(tj);
                    crossings.push((i, ti, j, tj));
                }
            }
        }

        let tables: Vec<PositionTable> = raw_positions
            .iter()
            .map(|raw| PositionTable::build(raw))
            .collect();

        // One departure record per (contour, crossing position): the
        // walk consumes it when it jumps off from there.
        let mut records: BTreeMap<(usize, usize), (usize, f64)> = BTreeMap::new();
        for (i, ti, j, tj) in crossings {
            let (Some(ki), Some(kj)) = (tables[i].index_of(ti), tables[j].index_of(tj)) else {
                return Err(OperationError::AssemblyInvariant(
                    "crossing position escaped the canonical table".into(),
                )
                .into());
            };
            let clash = records.insert((i, ki), (j, tables[j].position(kj))).is_some()
                || records.insert((j, kj), (i, tables[i].position(ki))).is_some();
            if clash {
                return Err(OperationError::AssemblyInvariant(
                    "coincident contour crossings".into(),
                )
                .into());
            }
        }

        let mut outputs: Vec<Curve> = Vec::new();

        // Untouched contours survive as they are.
        for (i, c) in self.contours.iter().enumerate() {
            if tables[i].len() == 0 {
                outputs.push(c.clone());
            }
        }

        let guard = records.len() + 1;
        while let Some((start, first_hop)) = records.pop_first() {
            let (mut cur_contour, mut cur_pos) = first_hop;
            let mut parts: Vec<Element> = Vec::new();
            let mut done = false;

            for _ in 0..guard {
                let next_k = self.next_crossing(&tables[cur_contour], cur_pos);
                let next_pos = tables[cur_contour].position(next_k);
                append_pieces(&mut parts, &self.contours[cur_contour].sub_curve(cur_pos, next_pos));

                if (cur_contour, next_k) == start {
                    done = true;
                    break;
                }
                let Some(hop) = records.remove(&(cur_contour, next_k)) else {
                    return Err(OperationError::AssemblyInvariant(
                        "contour walk reached a consumed crossing".into(),
                    )
                    .into());
                };
                (cur_contour, cur_pos) = hop;
            }
            if !done {
                return Err(OperationError::AssemblyInvariant(
                    "contour walk exceeded its step budget".into(),
                )
                .into());
            }
            if !parts.is_empty() {
                outputs.push(Curve::Chain(Chain::new(parts, true)));
            }
        }

        Ok(outputs)
    }

    /// True when contour `i` passes from one side of contour `j` to the
    /// other at the candidate intersection; a tangency stays on one side.
    fn crosses(&self, i: usize, ti: f64, j: usize, tj: f64) -> bool {
        let cj = &self.contours[j];
        let Ok(tangent) = cj.tangent(tj) else {
            return true;
        };
        let p = cj.point(tj);

        let ci = &self.contours[i];
        let d = ci.domain();
        let span = d.t_max - d.t_min;
        let wrap = |t: f64| d.t_min + (t - d.t_min).rem_euclid(span);
        let before = ci.point(wrap(ti - SIDE_STEP));
        let after = ci.point(wrap(ti + SIDE_STEP));

        let side_before = cross_2d(&tangent, &(before - p));
        let side_after = cross_2d(&tangent, &(after - p));
        side_before * side_after < 0.0
    }

    /// Index of the first crossing strictly ahead of `pos` on a closed
    /// contour, wrapping past the seam.
    fn next_crossing(&self, table: &PositionTable, pos: f64) -> usize {
        for k in 0..table.len() {
            if table.position(k) > pos + PARAM_EPS {
                return k;
            }
        }
        0
    }
}

fn append_pieces(parts: &mut Vec<Element>, sub: &Curve) {
    parts.extend_from_slice(sub.pieces());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::geometry::Arc;
    use crate::math::Point2;

    fn circle(cx: f64, cy: f64, r: f64) -> Curve {
        Curve::Single(Element::Arc(
            Arc::full_circle(Point2::new(cx, cy), r).unwrap(),
        ))
    }

    #[test]
    fn disjoint_contours_pass_through() {
        let a = circle(0.0, 0.0, 1.0);
        let b = circle(10.0, 0.0, 1.0);
        let out = SplitContours::new(vec![a.clone(), b.clone()]).execute().unwrap();
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn externally_tangent_circles_pass_through_unchanged() {
        // The single touch point at (1, 0) is not a crossing; neither
        // contour may be rewired at it.
        let a = circle(0.0, 0.0, 1.0);
        let b = circle(2.0, 0.0, 1.0);
        let out = SplitContours::new(vec![a.clone(), b.clone()]).execute().unwrap();
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn internally_tangent_circles_pass_through_unchanged() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(1.0, 0.0, 1.0);
        let out = SplitContours::new(vec![a.clone(), b.clone()]).execute().unwrap();
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn open_input_is_rejected() {
        let arc = Curve::Single(Element::Arc(
            Arc::new(Point2::new(0.0, 0.0), 1.0, 0.0, 1.0).unwrap(),
        ));
        assert!(SplitContours::new(vec![arc]).execute().is_err());
    }

    #[test]
    fn two_crossing_circles_split_into_lens_and_hull() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(2.0, 0.0, 2.0);
        let out = SplitContours::new(vec![a, b]).execute().unwrap();
        assert_eq!(out.len(), 2);
        for c in &out {
            assert!(c.is_closed());
        }

        // Total arc length is preserved by the rewiring.
        let total: f64 = out.iter().map(|c| c.length().unwrap()).sum();
        assert_relative_eq!(total, 8.0 * std::f64::consts::PI, epsilon = 1e-9);

        // One output is the outer hull through the circles' far points;
        // the other is the lens between them.
        let hull = out
            .iter()
            .find(|c| c.position(&Point2::new(-2.0, 0.0)).is_some())
            .unwrap();
        assert!(hull.position(&Point2::new(4.0, 0.0)).is_some());
        let lens = out
            .iter()
            .find(|c| c.position(&Point2::new(0.0, 0.0)).is_some())
            .unwrap();
        assert!(lens.position(&Point2::new(2.0, 0.0)).is_some());
        assert!(lens.position(&Point2::new(-2.0, 0.0)).is_none());
    }
}
