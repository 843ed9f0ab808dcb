//! Gauss-Jordan inversion over non-commutative rings.
//!
//! The engine works on "lines", which are rows or columns depending on the
//! mode, and composes coefficients on one fixed side:
//!
//! | mode            | lines   | side  | pivot inverse  | identity product                  |
//! |-----------------|---------|-------|----------------|-----------------------------------|
//! | `Left`          | rows    | left  | `invert_left`  | `inv * m`                         |
//! | `Right`         | columns | right | `invert_right` | `m * inv`                         |
//! | `LeftRevCoeff`  | rows    | right | `invert_right` | `inv.multiply_rev_coeff(m)`       |
//! | `RightRevCoeff` | columns | left  | `invert_left`  | `m.multiply_rev_coeff(inv)`       |
//!
//! Both the working copy and the accumulator are held as one sparse map per
//! line, plus an index from cross position to the lines that are non-zero
//! there. Pivot search and the choice of lines to eliminate read the index,
//! so zero entries are never visited.

use std::collections::hash_map::Entry;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, trace};

use simplealg_rings::traits::{ApproxEq, RingElement, RingFactory};
use simplealg_rings::{Axis, NotInvertible};

use crate::parallel::map_lines;
use crate::square_matrix::{SparseLine, SquareMatrix};

/// The four inversion modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Inversion {
    /// Row operations composed on the left; `inv * m == I`.
    Left,
    /// Column operations composed on the right; `m * inv == I`.
    Right,
    /// Row operations composed on the right; `inv.multiply_rev_coeff(m) == I`.
    LeftRevCoeff,
    /// Column operations composed on the left; `m.multiply_rev_coeff(inv) == I`.
    RightRevCoeff,
}

impl Inversion {
    /// All modes.
    pub const ALL: [Self; 4] = [
        Self::Left,
        Self::Right,
        Self::LeftRevCoeff,
        Self::RightRevCoeff,
    ];

    /// Combines `matrix` with its computed `inverse` using the product under
    /// which this mode's result reproduces the identity.
    #[must_use]
    pub fn identity_product<R: RingElement>(
        self,
        matrix: &SquareMatrix<R>,
        inverse: &SquareMatrix<R>,
    ) -> SquareMatrix<R> {
        match self {
            Self::Left => inverse.multiply(matrix),
            Self::Right => matrix.multiply(inverse),
            Self::LeftRevCoeff => inverse.multiply_rev_coeff(matrix),
            Self::RightRevCoeff => matrix.multiply_rev_coeff(inverse),
        }
    }

    /// Returns true if `inverse` is an inverse of `matrix` in this mode, to
    /// within `tolerance` per cell.
    #[must_use]
    pub fn verify<R: RingElement + ApproxEq>(
        self,
        matrix: &SquareMatrix<R>,
        inverse: &SquareMatrix<R>,
        tolerance: f64,
    ) -> bool {
        self.identity_product(matrix, inverse)
            .is_identity_approx(tolerance)
    }

    fn lines(self) -> Lines {
        match self {
            Self::Left | Self::LeftRevCoeff => Lines::Rows,
            Self::Right | Self::RightRevCoeff => Lines::Columns,
        }
    }

    fn side(self) -> Side {
        match self {
            Self::Left | Self::RightRevCoeff => Side::Left,
            Self::Right | Self::LeftRevCoeff => Side::Right,
        }
    }
}

/// How a pivot is chosen among the candidate lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PivotStrategy {
    /// Take the first non-zero candidate in ascending line order. If it
    /// cannot be inverted, fail with [`NotInvertible::SingularPivot`].
    #[default]
    FirstNonZero,
    /// Skip candidates whose inversion fails and keep scanning. Fails with
    /// [`NotInvertible::Singular`] only when no candidate inverts.
    ///
    /// This matters for rings with non-zero non-units, such as matrix rings.
    FirstInvertible,
}

/// Configuration for the elimination engine.
#[derive(Clone, Debug)]
pub struct EliminationConfig {
    /// Minimum number of lines to update at one pivot before the updates
    /// run on the rayon pool.
    pub parallel_threshold: usize,
    /// Pivot selection policy.
    pub pivot_strategy: PivotStrategy,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            pivot_strategy: PivotStrategy::FirstNonZero,
        }
    }
}

impl EliminationConfig {
    /// A configuration that never leaves the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Returns this configuration with a different pivot strategy.
    #[must_use]
    pub fn with_pivot_strategy(mut self, pivot_strategy: PivotStrategy) -> Self {
        self.pivot_strategy = pivot_strategy;
        self
    }
}

#[derive(Clone, Copy, Debug)]
enum Lines {
    Rows,
    Columns,
}

impl Lines {
    /// Axis scanned for a pivot: eliminating rows searches down a column.
    fn search_axis(self) -> Axis {
        match self {
            Self::Rows => Axis::Column,
            Self::Columns => Axis::Row,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn compose<R: RingElement>(self, coeff: &R, value: &R) -> R {
        match self {
            Self::Left => coeff.multiply(value),
            Self::Right => value.multiply(coeff),
        }
    }

    fn invert<R: RingElement>(self, value: &R) -> Result<R, NotInvertible> {
        match self {
            Self::Left => value.invert_left(),
            Self::Right => value.invert_right(),
        }
    }
}

impl<R: RingElement> SquareMatrix<R> {
    /// Inverts in the given mode with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert(&self, inversion: Inversion) -> Result<Self, NotInvertible> {
        self.invert_with(inversion, &EliminationConfig::default())
    }

    /// Inverts in the given mode.
    ///
    /// The input is not modified.
    ///
    /// # Errors
    ///
    /// - [`NotInvertible::Singular`] if some pivot position has no non-zero
    ///   candidate (or, under [`PivotStrategy::FirstInvertible`], no
    ///   invertible one).
    /// - [`NotInvertible::SingularPivot`] if the chosen pivot fails to
    ///   invert; the ring's own error is the source.
    pub fn invert_with(
        &self,
        inversion: Inversion,
        config: &EliminationConfig,
    ) -> Result<Self, NotInvertible> {
        let span = debug_span!(
            "invert",
            mode = ?inversion,
            dimension = self.dimension(),
            nnz = self.nnz()
        );
        let _enter = span.enter();

        let lines = inversion.lines();
        let mut engine = Elimination::new(self, lines, inversion.side(), config);
        match engine.run() {
            Ok(()) => {
                let result = join(engine.accum, lines, self.dimension(), self.factory());
                debug!(nnz = result.nnz(), "inversion complete");
                Ok(result)
            }
            Err(err) => {
                debug!(error = %err, "inversion failed");
                Err(err)
            }
        }
    }

    /// Computes `L` with `L * self == I`, using row operations composed on
    /// the left.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_left(&self) -> Result<Self, NotInvertible> {
        self.invert(Inversion::Left)
    }

    /// Like [`SquareMatrix::invert_left`], with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_left_with(&self, config: &EliminationConfig) -> Result<Self, NotInvertible> {
        self.invert_with(Inversion::Left, config)
    }

    /// Computes `R` with `self * R == I`, using column operations composed
    /// on the right.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_right(&self) -> Result<Self, NotInvertible> {
        self.invert(Inversion::Right)
    }

    /// Like [`SquareMatrix::invert_right`], with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_right_with(&self, config: &EliminationConfig) -> Result<Self, NotInvertible> {
        self.invert_with(Inversion::Right, config)
    }

    /// Row elimination with coefficients composed on the right.
    ///
    /// The result `L` satisfies `L.multiply_rev_coeff(self) == I`. Under the
    /// ordinary product it is generally not an inverse once entries do not
    /// commute.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_left_rev_coeff(&self) -> Result<Self, NotInvertible> {
        self.invert(Inversion::LeftRevCoeff)
    }

    /// Like [`SquareMatrix::invert_left_rev_coeff`], with an explicit
    /// configuration.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_left_rev_coeff_with(
        &self,
        config: &EliminationConfig,
    ) -> Result<Self, NotInvertible> {
        self.invert_with(Inversion::LeftRevCoeff, config)
    }

    /// Column elimination with coefficients composed on the left.
    ///
    /// The result `R` satisfies `self.multiply_rev_coeff(R) == I`.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_right_rev_coeff(&self) -> Result<Self, NotInvertible> {
        self.invert(Inversion::RightRevCoeff)
    }

    /// Like [`SquareMatrix::invert_right_rev_coeff`], with an explicit
    /// configuration.
    ///
    /// # Errors
    ///
    /// See [`SquareMatrix::invert_with`].
    pub fn invert_right_rev_coeff_with(
        &self,
        config: &EliminationConfig,
    ) -> Result<Self, NotInvertible> {
        self.invert_with(Inversion::RightRevCoeff, config)
    }
}

/// Working state of one inversion.
struct Elimination<'a, R: RingElement> {
    work: Vec<SparseLine<R>>,
    accum: Vec<SparseLine<R>>,
    /// cross position -> lines of `work` with a non-zero entry there.
    occupancy: Vec<FxHashSet<usize>>,
    side: Side,
    axis: Axis,
    identity: R,
    config: &'a EliminationConfig,
}

impl<'a, R: RingElement> Elimination<'a, R> {
    fn new(
        matrix: &SquareMatrix<R>,
        lines: Lines,
        side: Side,
        config: &'a EliminationConfig,
    ) -> Self {
        let n = matrix.dimension();
        let identity = matrix.factory().identity();
        let work = split(matrix, lines);

        let mut occupancy = vec![FxHashSet::default(); n];
        for (line, entries) in work.iter().enumerate() {
            for &cross in entries.keys() {
                occupancy[cross].insert(line);
            }
        }

        let accum = (0..n)
            .map(|i| {
                let mut line = FxHashMap::default();
                line.insert(i, identity.clone());
                line
            })
            .collect();

        Self {
            work,
            accum,
            occupancy,
            side,
            axis: lines.search_axis(),
            identity,
            config,
        }
    }

    fn run(&mut self) -> Result<(), NotInvertible> {
        for pivot in 0..self.work.len() {
            let (line, inverse) = self.find_pivot(pivot)?;
            if line != pivot {
                trace!(pivot, from = line, "swapping lines");
                self.swap(pivot, line);
            }
            self.normalize(pivot, &inverse);
            self.eliminate(pivot);
        }
        Ok(())
    }

    /// Picks the pivot line for position `pivot` and inverts its entry.
    fn find_pivot(&self, pivot: usize) -> Result<(usize, R), NotInvertible> {
        let mut candidates: Vec<usize> = self.occupancy[pivot]
            .iter()
            .copied()
            .filter(|&line| line >= pivot)
            .collect();
        candidates.sort_unstable();

        for line in candidates {
            let Some(value) = self.work[line].get(&pivot) else {
                continue;
            };
            match self.side.invert(value) {
                Ok(inverse) => return Ok((line, inverse)),
                Err(source) => match self.config.pivot_strategy {
                    PivotStrategy::FirstNonZero => {
                        return Err(NotInvertible::SingularPivot {
                            axis: self.axis,
                            index: pivot,
                            source: Box::new(source),
                        });
                    }
                    PivotStrategy::FirstInvertible => {
                        trace!(pivot, line, error = %source, "skipping candidate");
                    }
                },
            }
        }

        Err(NotInvertible::Singular {
            axis: self.axis,
            index: pivot,
        })
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.unindex(a);
        self.unindex(b);
        self.work.swap(a, b);
        self.accum.swap(a, b);
        self.index(a);
        self.index(b);
    }

    /// Scales the pivot line so its pivot entry becomes the identity.
    fn normalize(&mut self, pivot: usize, inverse: &R) {
        let side = self.side;
        let mut work = scale_line(&self.work[pivot], inverse, side);
        work.insert(pivot, self.identity.clone());
        self.accum[pivot] = scale_line(&self.accum[pivot], inverse, side);
        self.replace_work(pivot, work);
    }

    /// Clears position `pivot` from every other line.
    fn eliminate(&mut self, pivot: usize) {
        let mut targets: Vec<usize> = self.occupancy[pivot]
            .iter()
            .copied()
            .filter(|&line| line != pivot)
            .collect();
        targets.sort_unstable();
        if targets.is_empty() {
            return;
        }

        let this = &*self;
        let updates = map_lines(&targets, this.config.parallel_threshold, |line| {
            this.eliminated(line, pivot)
        });

        for (line, work, accum) in updates {
            self.replace_work(line, work);
            self.accum[line] = accum;
        }
        trace!(pivot, updated = targets.len(), "eliminated");
    }

    /// Computes the new (work, accum) contents of `line` after clearing
    /// position `pivot`.
    fn eliminated(&self, line: usize, pivot: usize) -> (usize, SparseLine<R>, SparseLine<R>) {
        let mut work = self.work[line].clone();
        let mut accum = self.accum[line].clone();
        if let Some(coeff) = self.work[line].get(&pivot) {
            subtract_scaled(&mut work, &self.work[pivot], coeff, self.side);
            subtract_scaled(&mut accum, &self.accum[pivot], coeff, self.side);
        }
        // Exactly zero by construction; inexact rings may leave a residue.
        work.remove(&pivot);
        (line, work, accum)
    }

    fn replace_work(&mut self, line: usize, entries: SparseLine<R>) {
        self.unindex(line);
        self.work[line] = entries;
        self.index(line);
    }

    fn index(&mut self, line: usize) {
        for &cross in self.work[line].keys() {
            self.occupancy[cross].insert(line);
        }
    }

    fn unindex(&mut self, line: usize) {
        for &cross in self.work[line].keys() {
            self.occupancy[cross].remove(&line);
        }
    }
}

/// Returns `line` with every entry composed with `coeff` on `side`.
fn scale_line<R: RingElement>(line: &SparseLine<R>, coeff: &R, side: Side) -> SparseLine<R> {
    line.iter()
        .map(|(&cross, value)| (cross, side.compose(coeff, value)))
        .filter(|(_, value)| !value.is_zero())
        .collect()
}

/// `target -= coeff ∘ source`, composing on `side` and dropping zeros.
fn subtract_scaled<R: RingElement>(
    target: &mut SparseLine<R>,
    source: &SparseLine<R>,
    coeff: &R,
    side: Side,
) {
    for (&cross, value) in source {
        let term = side.compose(coeff, value);
        match target.entry(cross) {
            Entry::Occupied(mut e) => {
                let diff = e.get().subtract(&term);
                if diff.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = diff;
                }
            }
            Entry::Vacant(e) => {
                let neg = term.negate();
                if !neg.is_zero() {
                    e.insert(neg);
                }
            }
        }
    }
}

/// Splits a matrix into its rows or its columns.
fn split<R: RingElement>(matrix: &SquareMatrix<R>, lines: Lines) -> Vec<SparseLine<R>> {
    let mut out = vec![FxHashMap::default(); matrix.dimension()];
    for (row, col, value) in matrix.entries() {
        let (line, cross) = match lines {
            Lines::Rows => (row, col),
            Lines::Columns => (col, row),
        };
        out[line].insert(cross, value.clone());
    }
    out
}

/// Reassembles a matrix from its rows or its columns.
fn join<R: RingElement>(
    lines: Vec<SparseLine<R>>,
    orientation: Lines,
    dimension: usize,
    factory: &R::Factory,
) -> SquareMatrix<R> {
    let mut rows: FxHashMap<usize, SparseLine<R>> = FxHashMap::default();
    for (line, entries) in lines.into_iter().enumerate() {
        match orientation {
            Lines::Rows => {
                if !entries.is_empty() {
                    rows.insert(line, entries);
                }
            }
            Lines::Columns => {
                for (cross, value) in entries {
                    rows.entry(cross).or_default().insert(line, value);
                }
            }
        }
    }
    SquareMatrix::from_parts(rows, dimension, factory.clone())
}
