//! Parallel matrix operations.
//!
//! This module provides the rayon-backed paths: per-line elimination
//! updates, row-parallel multiplication, and batch inversion.

use rayon::prelude::*;
use tracing::debug;

use simplealg_rings::traits::RingElement;
use simplealg_rings::NotInvertible;

use crate::elimination::{EliminationConfig, Inversion};
use crate::square_matrix::{product_row, SquareMatrix};

/// Maps `f` over `lines`, on the rayon pool once there are at least
/// `threshold` of them.
///
/// Results come back in the order of `lines` either way.
pub(crate) fn map_lines<T, F>(lines: &[usize], threshold: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if lines.len() < threshold {
        return lines.iter().map(|&line| f(line)).collect();
    }

    debug!(lines = lines.len(), threshold, "parallel line update");
    lines.par_iter().map(|&line| f(line)).collect()
}

impl<R: RingElement> SquareMatrix<R> {
    /// Returns `self * other`, computing result rows in parallel.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn multiply_parallel(&self, other: &Self) -> Self {
        assert_eq!(self.dimension(), other.dimension(), "dimension mismatch");

        let rows = self
            .rows()
            .par_iter()
            .map(|(&row, lhs)| (row, product_row(lhs, other, false)))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        Self::from_parts(rows, self.dimension(), self.factory().clone())
    }
}

/// Inverts each matrix independently on the rayon pool.
///
/// Results are in input order. Within each inversion, line updates may
/// also go parallel according to `config`.
#[must_use]
pub fn par_invert<R: RingElement>(
    matrices: &[SquareMatrix<R>],
    inversion: Inversion,
    config: &EliminationConfig,
) -> Vec<Result<SquareMatrix<R>, NotInvertible>> {
    matrices
        .par_iter()
        .map(|m| m.invert_with(inversion, config))
        .collect()
}
