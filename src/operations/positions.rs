//! Canonicalization of curve positions for the splitting machinery.

use crate::math::PARAM_EPS;

/// A sorted table of canonical curve positions.
///
/// Intersection positions computed from independent element pairs can
/// differ by rounding even when they denote the same point on the
/// curve. The table snaps all raw positions within `PARAM_EPS` of each
/// other to one representative, so positions can be used as exact map
/// keys downstream.
#[derive(Debug)]
pub(crate) struct PositionTable {
    positions: Vec<f64>,
}

impl PositionTable {
    pub fn build(raw: &[f64]) -> Self {
        let mut sorted = raw.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut positions: Vec<f64> = Vec::with_capacity(sorted.len());
        for t in sorted {
            match positions.last() {
                Some(last) if t - last <= PARAM_EPS => {}
                _ => positions.push(t),
            }
        }
        Self { positions }
    }

    /// Index of the canonical position nearest `t`, if within tolerance.
    pub fn index_of(&self, t: f64) -> Option<usize> {
        let i = self
            .positions
            .partition_point(|p| *p < t - PARAM_EPS);
        (i < self.positions.len() && (self.positions[i] - t).abs() <= PARAM_EPS).then_some(i)
    }

    pub fn position(&self, index: usize) -> f64 {
        self.positions[index]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
