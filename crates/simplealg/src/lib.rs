//! # simplealg
//!
//! Sparse square-matrix inversion over arbitrary rings.
//!
//! Entries may come from any type implementing `RingElement`: floats,
//! exact rationals, prime fields, quaternions, symbolic expressions, or
//! other matrices. Multiplication is never assumed to commute, so left
//! and right inverses are computed separately.
//!
//! ## Features
//!
//! - **Sparse storage**: only non-zero entries are kept and visited
//! - **Four inversion modes**: left, right, and reversed-coefficient forms
//! - **Nesting**: a `SquareMatrix` is a ring element, so block matrices work
//! - **Symbolic entries**: invert with unknowns, evaluate later
//! - **Parallelism**: rayon for large elimination steps and batches
//!
//! ## Quick Start
//!
//! ```rust
//! use simplealg::prelude::*;
//!
//! let q = Q::from_integer;
//! let m = SquareMatrix::from_rows(vec![vec![q(1), q(2)], vec![q(3), q(4)]], &QFactory);
//!
//! let inv = m.invert_left()?;
//! assert_eq!(inv.multiply(&m), SquareMatrix::identity(2, &QFactory));
//! assert_eq!(inv.get(1, 0), Q::new(3, 2));
//! # Ok::<(), NotInvertible>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use simplealg_linalg as linalg;
pub use simplealg_rings as rings;
pub use simplealg_symbolic as symbolic;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use simplealg_linalg::{
        par_invert, EliminationConfig, Inversion, PivotStrategy, SquareMatrix,
        SquareMatrixFactory,
    };
    pub use simplealg_rings::{
        ApproxEq, Axis, CommutativeRing, F32Factory, F64Factory, FiniteField,
        FiniteFieldFactory, NotInvertible, Quaternion, QuaternionFactory, RingElement,
        RingFactory, Q, QFactory,
    };
    pub use simplealg_symbolic::{
        Bindings, EvalError, SymbolId, SymbolTable, Symbolic, SymbolicFactory,
    };
}
