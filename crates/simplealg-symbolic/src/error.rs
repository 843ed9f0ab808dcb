//! Evaluation failures.

use thiserror::Error;

use simplealg_rings::NotInvertible;

use crate::expr::SymbolId;

/// Failure while evaluating a symbolic expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable has no binding.
    #[error("unbound variable x{0}")]
    UnboundVariable(SymbolId),

    /// A deferred inverse turned out not to exist.
    #[error(transparent)]
    NotInvertible(#[from] NotInvertible),
}
