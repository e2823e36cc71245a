//! Splitting a curve at its self-intersections.

use std::collections::BTreeMap;

use crate::error::{OperationError, Result};
use crate::geometry::{Chain, Curve, Element};
use crate::math::PARAM_EPS;
use crate::operations::positions::PositionTable;

/// Rewrites a curve as a set of simple (non-self-intersecting) curves.
///
/// Every output curve is assembled purely by concatenating sub-pieces
/// of the input, so no geometry is re-derived. The first output
/// carries the input's two open ends (or its seam, when closed); every
/// further output is a closed loop bounded by self-intersection points.
#[derive(Debug)]
pub struct SplitCurve {
    curve: Curve,
}

impl SplitCurve {
    /// Creates a new curve splitting operation.
    #[must_use]
    pub fn new(curve: Curve) -> Self {
        Self { curve }
    }

    /// Executes the split, returning the simple curves.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::AssemblyInvariant` when the recorded
    /// self-intersections cannot be threaded into loops (coincident
    /// crossing points, or a walk that fails to terminate).
    pub fn execute(&self) -> Result<Vec<Curve>> {
        // Atomic elements cannot self-intersect.
        if matches!(self.curve, Curve::Single(_)) {
            return Ok(vec![self.curve.clone()]);
        }

        let pairs = self.self_intersections();
        if pairs.is_empty() {
            return Ok(vec![self.curve.clone()]);
        }

        let mut raw = Vec::with_capacity(pairs.len() * 2);
        for (a, b) in &pairs {
            raw.push(*a);
            raw.push(*b);
        }
        let table = PositionTable::build(&raw);

        // Symmetric twin map over canonical position indices.
        let mut twins: BTreeMap<usize, usize> = BTreeMap::new();
        for (a, b) in pairs {
            let (Some(ia), Some(ib)) = (table.index_of(a), table.index_of(b)) else {
                return Err(OperationError::AssemblyInvariant(
                    "intersection position escaped the canonical table".into(),
                )
                .into());
            };
            if ia == ib {
                // Both positions snapped together: a touch, not a crossing.
                continue;
            }
            if twins.insert(ia, ib).is_some() || twins.insert(ib, ia).is_some() {
                return Err(OperationError::AssemblyInvariant(
                    "coincident self-intersection positions".into(),
                )
                .into());
            }
        }
        if twins.is_empty() {
            return Ok(vec![self.curve.clone()]);
        }

        let domain = self.curve.domain();
        let closed = self.curve.is_closed();
        let guard = 2 * twins.len() + 2;
        let mut outputs = Vec::new();

        // First pass: walk from t0, jumping across each crossing, until
        // the far end. The arrival key is consumed; its twin survives to
        // seed a later loop.
        let mut parts: Vec<Element> = Vec::new();
        let mut cur = domain.t_min;
        for _ in 0..guard {
            let next = twins
                .keys()
                .copied()
                .find(|k| table.position(*k) > cur + PARAM_EPS);
            let Some(k) = next else {
                append_pieces(&mut parts, &self.curve.sub_curve(cur, domain.t_max));
                break;
            };
            append_pieces(&mut parts, &self.curve.sub_curve(cur, table.position(k)));
            let Some(twin) = twins.remove(&k) else {
                return Err(
                    OperationError::AssemblyInvariant("twin map lost an entry".into()).into(),
                );
            };
            cur = table.position(twin);
        }
        if !parts.is_empty() {
            outputs.push(Curve::Chain(Chain::new(parts, closed)));
        }

        // Secondary passes: each surviving entry terminates one closed loop.
        loop {
            let Some((&k0, &first_twin)) = twins.iter().next() else {
                break;
            };
            let k0_pos = table.position(k0);
            let mut cur = table.position(first_twin);
            let mut parts: Vec<Element> = Vec::new();
            let mut done = false;

            for _ in 0..guard {
                let next = twins
                    .keys()
                    .copied()
                    .find(|k| table.position(*k) > cur + PARAM_EPS)
                    .or_else(|| closed.then(|| twins.keys().copied().next()).flatten());
                match next {
                    Some(k) if k == k0 => {
                        append_pieces(&mut parts, &self.curve.sub_curve(cur, k0_pos));
                        twins.remove(&k0);
                        done = true;
                        break;
                    }
                    Some(k) => {
                        append_pieces(&mut parts, &self.curve.sub_curve(cur, table.position(k)));
                        let Some(twin) = twins.remove(&k) else {
                            return Err(OperationError::AssemblyInvariant(
                                "twin map lost an entry".into(),
                            )
                            .into());
                        };
                        cur = table.position(twin);
                    }
                    None => {
                        return Err(OperationError::AssemblyInvariant(
                            "self-intersection loop never closed".into(),
                        )
                        .into())
                    }
                }
            }
            if !done {
                return Err(OperationError::AssemblyInvariant(
                    "self-intersection walk exceeded its step budget".into(),
                )
                .into());
            }
            if !parts.is_empty() {
                outputs.push(Curve::Chain(Chain::new(parts, true)));
            }
        }

        Ok(outputs)
    }

    /// All interior crossings as `(position, position)` pairs on the
    /// curve's global parameterization. Shared endpoints of adjacent
    /// pieces (including the seam of a closed curve) are joints, not
    /// crossings.
    fn self_intersections(&self) -> Vec<(f64, f64)> {
        let pieces = self.curve.pieces();
        let n = pieces.len();
        let closed = self.curve.is_closed();
        let mut out = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                for (_, ti, tj) in pieces[i].intersections(&pieces[j]) {
                    let joint = j == i + 1
                        && (ti - 1.0).abs() < PARAM_EPS
                        && tj.abs() < PARAM_EPS;
                    let seam = closed
                        && i == 0
                        && j == n - 1
                        && ti.abs() < PARAM_EPS
                        && (tj - 1.0).abs() < PARAM_EPS;
                    if joint || seam {
                        continue;
                    }
                    out.push((self.curve.globalize(i, ti), self.curve.globalize(j, tj)));
                }
            }
        }
        out
    }
}

fn append_pieces(parts: &mut Vec<Element>, sub: &Curve) {
    parts.extend_from_slice(sub.pieces());
}
