//! Sparse square matrices over an arbitrary ring.
//!
//! Storage is a map of maps, `row -> (column -> value)`, holding only the
//! entries that are not the ring's zero. Every operation walks stored
//! entries only, so cost tracks the non-zero count rather than N².
//!
//! A `SquareMatrix<R>` is itself a ring element, which is how matrices of
//! matrices are built: `SquareMatrix<SquareMatrix<f64>>`.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use simplealg_rings::traits::{ApproxEq, CommutativeRing, RingElement, RingFactory};
use simplealg_rings::NotInvertible;

/// One sparse line of a matrix: index -> non-zero value.
pub(crate) type SparseLine<R> = FxHashMap<usize, R>;

/// Square matrix stored as a sparse map of rows.
///
/// # Invariants
///
/// - No stored entry satisfies `is_zero()`
/// - No stored row is empty
/// - The dimension never changes after construction
#[derive(Clone, Debug)]
pub struct SquareMatrix<R: RingElement> {
    /// Non-zero entries by row, then by column.
    rows: FxHashMap<usize, SparseLine<R>>,
    /// Number of rows and of columns.
    dimension: usize,
    /// Factory for the entry ring.
    factory: R::Factory,
}

impl<R: RingElement> SquareMatrix<R> {
    /// Creates the zero matrix.
    ///
    /// The entry type is taken from the factory, so
    /// `SquareMatrix::new(3, &QFactory)` needs no annotation.
    #[must_use]
    pub fn new<F>(dimension: usize, factory: &F) -> Self
    where
        F: RingFactory<Element = R>,
        R: RingElement<Factory = F>,
    {
        Self {
            rows: FxHashMap::default(),
            dimension,
            factory: factory.clone(),
        }
    }

    /// Creates the identity matrix.
    #[must_use]
    pub fn identity<F>(dimension: usize, factory: &F) -> Self
    where
        F: RingFactory<Element = R>,
        R: RingElement<Factory = F>,
    {
        Self::from_diagonal(&factory.identity(), dimension, factory)
    }

    /// Creates a diagonal matrix with `value` in every diagonal cell.
    #[must_use]
    pub fn from_diagonal<F>(value: &R, dimension: usize, factory: &F) -> Self
    where
        F: RingFactory<Element = R>,
        R: RingElement<Factory = F>,
    {
        let mut m = Self::new(dimension, factory);
        for i in 0..dimension {
            m.set(i, i, value.clone());
        }
        m
    }

    /// Creates a matrix from dense rows.
    ///
    /// Zero entries are not stored.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square.
    #[must_use]
    pub fn from_rows<F>(dense: Vec<Vec<R>>, factory: &F) -> Self
    where
        F: RingFactory<Element = R>,
        R: RingElement<Factory = F>,
    {
        let dimension = dense.len();
        let mut m = Self::new(dimension, factory);
        for (row, values) in dense.into_iter().enumerate() {
            assert_eq!(values.len(), dimension, "row {row} has the wrong length");
            for (col, val) in values.into_iter().enumerate() {
                m.set(row, col, val);
            }
        }
        m
    }

    /// Creates a matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed in iteration order.
    #[must_use]
    pub fn from_triplets<I, F>(dimension: usize, triplets: I, factory: &F) -> Self
    where
        I: IntoIterator<Item = (usize, usize, R)>,
        F: RingFactory<Element = R>,
        R: RingElement<Factory = F>,
    {
        let mut m = Self::new(dimension, factory);
        for (row, col, val) in triplets {
            let sum = match m.get_ref(row, col) {
                Some(prev) => prev.add(&val),
                None => val,
            };
            m.set(row, col, sum);
        }
        m
    }

    /// Returns the number of rows (equal to the number of columns).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the factory of the entry ring.
    #[must_use]
    pub fn factory(&self) -> &R::Factory {
        &self.factory
    }

    /// Returns the number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.values().map(FxHashMap::len).sum()
    }

    /// Returns the fraction of cells that are non-zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        let total = self.dimension * self.dimension;
        if total == 0 {
            0.0
        } else {
            self.nnz() as f64 / total as f64
        }
    }

    /// Returns the entry at (row, col), or the ring's zero if none is stored.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> R {
        self.get_ref(row, col)
            .cloned()
            .unwrap_or_else(|| self.factory.zero())
    }

    /// Returns a reference to the stored entry at (row, col), or None if zero.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get_ref(&self, row: usize, col: usize) -> Option<&R> {
        self.check_index(row, col);
        self.rows.get(&row)?.get(&col)
    }

    /// Replaces the entry at (row, col). Storing zero removes the entry.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: R) {
        self.check_index(row, col);
        if value.is_zero() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
    }

    /// Removes the entry at (row, col), returning it if one was stored.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<R> {
        self.check_index(row, col);
        let Entry::Occupied(mut line) = self.rows.entry(row) else {
            return None;
        };
        let removed = line.get_mut().remove(&col);
        if line.get().is_empty() {
            line.remove();
        }
        removed
    }

    /// Returns an iterator over all stored entries as (row, col, value).
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        self.rows
            .iter()
            .flat_map(|(&row, line)| line.iter().map(move |(&col, val)| (row, col, val)))
    }

    /// Returns an iterator over the stored entries of one row as (col, value).
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, &R)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|line| line.iter().map(|(&col, val)| (col, val)))
    }

    /// Converts to a dense row-major representation.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<R>> {
        let mut dense = vec![vec![self.factory.zero(); self.dimension]; self.dimension];
        for (row, col, val) in self.entries() {
            dense[row][col] = val.clone();
        }
        dense
    }

    /// Returns the entrywise sum.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.check_dimension(other);
        let mut ret = self.clone();
        for (row, col, val) in other.entries() {
            let sum = match ret.get_ref(row, col) {
                Some(prev) => prev.add(val),
                None => val.clone(),
            };
            ret.set(row, col, sum);
        }
        ret
    }

    /// Returns the entrywise negation.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.map(RingElement::negate)
    }

    /// Returns the entrywise difference.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Returns the matrix product `self * other`.
    ///
    /// Each term is `self[i][k] * other[k][j]`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.product(other, false)
    }

    /// Returns the product with reversed coefficients.
    ///
    /// Entry (i, j) is `Σ_k other[k][j] * self[i][k]`: the matrix structure
    /// is that of `self * other`, but each pair of entries multiplies in the
    /// opposite order. This is the product under which the results of
    /// [`SquareMatrix::invert_left_rev_coeff`] and
    /// [`SquareMatrix::invert_right_rev_coeff`] reproduce the identity.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn multiply_rev_coeff(&self, other: &Self) -> Self {
        self.product(other, true)
    }

    fn product(&self, other: &Self, reversed: bool) -> Self {
        self.check_dimension(other);
        let mut ret = Self::new(self.dimension, &self.factory);
        for (&row, lhs) in &self.rows {
            let line = product_row(lhs, other, reversed);
            if !line.is_empty() {
                ret.rows.insert(row, line);
            }
        }
        ret
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut ret = Self::new(self.dimension, &self.factory);
        for (row, col, val) in self.entries() {
            ret.rows.entry(col).or_default().insert(row, val.clone());
        }
        ret
    }

    /// Applies `f` to every stored entry. Results that are zero are dropped.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(&R) -> R,
    {
        let mut ret = Self::new(self.dimension, &self.factory);
        for (row, col, val) in self.entries() {
            ret.set(row, col, f(val));
        }
        ret
    }

    /// Like [`SquareMatrix::map`], for fallible transformations.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<F>(&self, f: F) -> Result<Self, NotInvertible>
    where
        F: Fn(&R) -> Result<R, NotInvertible>,
    {
        let mut ret = Self::new(self.dimension, &self.factory);
        for (row, col, val) in self.entries() {
            ret.set(row, col, f(val)?);
        }
        Ok(ret)
    }

    /// Returns `s * self`, multiplying every entry on the left.
    #[must_use]
    pub fn scale_left(&self, s: &R) -> Self {
        self.map(|v| s.multiply(v))
    }

    /// Returns `self * s`, multiplying every entry on the right.
    #[must_use]
    pub fn scale_right(&self, s: &R) -> Self {
        self.map(|v| v.multiply(s))
    }

    /// Returns true if this matrix is within `tolerance` of the identity,
    /// cell by cell.
    #[must_use]
    pub fn is_identity_approx(&self, tolerance: f64) -> bool
    where
        R: ApproxEq,
    {
        self.approx_eq(&Self::identity(self.dimension, &self.factory), tolerance)
    }

    pub(crate) fn rows(&self) -> &FxHashMap<usize, SparseLine<R>> {
        &self.rows
    }

    pub(crate) fn from_parts(
        rows: FxHashMap<usize, SparseLine<R>>,
        dimension: usize,
        factory: R::Factory,
    ) -> Self {
        Self {
            rows,
            dimension,
            factory,
        }
    }

    fn check_index(&self, row: usize, col: usize) {
        assert!(
            row < self.dimension && col < self.dimension,
            "index ({row}, {col}) out of range for dimension {}",
            self.dimension
        );
    }

    fn check_dimension(&self, other: &Self) {
        assert_eq!(self.dimension, other.dimension, "dimension mismatch");
    }
}

impl<R: CommutativeRing> SquareMatrix<R> {
    /// Computes the determinant by cofactor expansion along the first row.
    ///
    /// Only the stored entries of each row are expanded, so sparse matrices
    /// stay cheap. Dense matrices cost O(n!): use this for small dimensions.
    #[must_use]
    pub fn determinant(&self) -> R {
        match self.dimension {
            0 => self.factory.identity(),
            1 => self.get(0, 0),
            _ => {
                let mut first: Vec<_> = self.row_entries(0).collect();
                first.sort_unstable_by_key(|&(col, _)| col);

                let mut det = self.factory.zero();
                for (col, val) in first {
                    let mut term = val.multiply(&self.minor(0, col).determinant());
                    if col % 2 == 1 {
                        term = term.negate();
                    }
                    det = det.add(&term);
                }
                det
            }
        }
    }

    /// Returns the matrix with one row and one column removed.
    fn minor(&self, skip_row: usize, skip_col: usize) -> Self {
        let shift = |i: usize, skip: usize| if i > skip { i - 1 } else { i };
        let mut ret = Self::new(self.dimension - 1, &self.factory);
        for (row, col, val) in self.entries() {
            if row != skip_row && col != skip_col {
                ret.rows
                    .entry(shift(row, skip_row))
                    .or_default()
                    .insert(shift(col, skip_col), val.clone());
            }
        }
        ret
    }
}

/// Computes one row of a product from the left operand's row.
pub(crate) fn product_row<R: RingElement>(
    lhs: &SparseLine<R>,
    rhs: &SquareMatrix<R>,
    reversed: bool,
) -> SparseLine<R> {
    let mut acc: SparseLine<R> = FxHashMap::default();
    for (&k, a) in lhs {
        let Some(rhs_row) = rhs.rows.get(&k) else {
            continue;
        };
        for (&col, b) in rhs_row {
            let term = if reversed { b.multiply(a) } else { a.multiply(b) };
            match acc.entry(col) {
                Entry::Occupied(mut e) => {
                    let sum = e.get().add(&term);
                    *e.get_mut() = sum;
                }
                Entry::Vacant(e) => {
                    e.insert(term);
                }
            }
        }
    }
    acc.retain(|_, v| !v.is_zero());
    acc
}

impl<R: RingElement> PartialEq for SquareMatrix<R> {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.rows == other.rows
    }
}

impl<R: RingElement + ApproxEq> ApproxEq for SquareMatrix<R> {
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        if self.dimension != other.dimension {
            return false;
        }
        let zero = self.factory.zero();
        self.entries()
            .chain(other.entries())
            .all(|(row, col, _)| {
                let a = self.get_ref(row, col).unwrap_or(&zero);
                let b = other.get_ref(row, col).unwrap_or(&zero);
                a.approx_eq(b, tolerance)
            })
    }
}

/// Factory for square matrices of a fixed dimension.
///
/// This is what lets a matrix be the entry type of another matrix.
#[derive(Clone, Debug)]
pub struct SquareMatrixFactory<R: RingElement> {
    dimension: usize,
    inner: R::Factory,
}

impl<R: RingElement> SquareMatrixFactory<R> {
    /// Creates a factory for `dimension`×`dimension` matrices over `inner`.
    #[must_use]
    pub fn new(dimension: usize, inner: R::Factory) -> Self {
        Self { dimension, inner }
    }

    /// Returns the dimension of the produced matrices.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the factory of the entry ring.
    #[must_use]
    pub fn inner(&self) -> &R::Factory {
        &self.inner
    }
}

impl<R: RingElement> RingFactory for SquareMatrixFactory<R> {
    type Element = SquareMatrix<R>;

    fn zero(&self) -> SquareMatrix<R> {
        SquareMatrix::new(self.dimension, &self.inner)
    }

    fn identity(&self) -> SquareMatrix<R> {
        SquareMatrix::identity(self.dimension, &self.inner)
    }
}

impl<R: RingElement> RingElement for SquareMatrix<R> {
    type Factory = SquareMatrixFactory<R>;

    fn add(&self, other: &Self) -> Self {
        SquareMatrix::add(self, other)
    }

    fn negate(&self) -> Self {
        SquareMatrix::negate(self)
    }

    fn multiply(&self, other: &Self) -> Self {
        SquareMatrix::multiply(self, other)
    }

    fn invert_left(&self) -> Result<Self, NotInvertible> {
        SquareMatrix::invert_left(self)
    }

    fn invert_right(&self) -> Result<Self, NotInvertible> {
        SquareMatrix::invert_right(self)
    }

    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    fn parent(&self) -> SquareMatrixFactory<R> {
        SquareMatrixFactory::new(self.dimension, self.factory.clone())
    }

    fn is_identity(&self) -> bool {
        self.rows.len() == self.dimension
            && self.rows.iter().all(|(&row, line)| {
                line.len() == 1 && line.get(&row).is_some_and(RingElement::is_identity)
            })
    }

    fn subtract(&self, other: &Self) -> Self {
        SquareMatrix::subtract(self, other)
    }
}
