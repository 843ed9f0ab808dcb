//! Inversion failures.

use std::fmt;

use thiserror::Error;

/// The matrix axis along which a pivot was searched.
///
/// Row elimination searches down a column; column elimination searches
/// along a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A matrix row.
    Row,
    /// A matrix column.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// An element, or a matrix of elements, has no inverse on the requested side.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NotInvertible {
    /// The element is the additive identity.
    #[error("cannot invert the zero element")]
    Zero,

    /// The element is non-zero but has no inverse.
    #[error("element {0} is not a unit")]
    NonUnit(String),

    /// No pivot candidate exists at this position.
    #[error("matrix is singular: no pivot in {axis} {index}")]
    Singular {
        /// Axis that was searched.
        axis: Axis,
        /// Index of the searched row or column.
        index: usize,
    },

    /// A pivot was found but could not itself be inverted.
    #[error("pivot in {axis} {index} is not invertible: {source}")]
    SingularPivot {
        /// Axis that was searched.
        axis: Axis,
        /// Index of the searched row or column.
        index: usize,
        /// The element-level failure.
        #[source]
        source: Box<NotInvertible>,
    },
}

impl NotInvertible {
    /// Returns the innermost element-level failure.
    #[must_use]
    pub fn root_cause(&self) -> &NotInvertible {
        match self {
            NotInvertible::SingularPivot { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = NotInvertible::Singular {
            axis: Axis::Column,
            index: 3,
        };
        assert_eq!(err.to_string(), "matrix is singular: no pivot in column 3");
    }

    #[test]
    fn test_root_cause() {
        let inner = NotInvertible::SingularPivot {
            axis: Axis::Row,
            index: 1,
            source: Box::new(NotInvertible::Zero),
        };
        let outer = NotInvertible::SingularPivot {
            axis: Axis::Column,
            index: 0,
            source: Box::new(inner),
        };
        assert_eq!(outer.root_cause(), &NotInvertible::Zero);
        assert_eq!(
            outer.to_string(),
            "pivot in column 0 is not invertible: pivot in row 1 is not invertible: \
             cannot invert the zero element"
        );
    }
}
