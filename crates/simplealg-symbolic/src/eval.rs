//! Evaluation and substitution.

use rustc_hash::FxHashMap;

use simplealg_rings::traits::{RingElement, RingFactory};

use crate::error::EvalError;
use crate::expr::{SymbolId, Symbolic, SymbolicNode};

/// Values for variables.
pub type Bindings<R> = FxHashMap<SymbolId, R>;

impl<R: RingElement> Symbolic<R> {
    /// Evaluates the expression in the base ring.
    ///
    /// Deferred operations run in `R` with their operand order intact.
    ///
    /// # Errors
    ///
    /// - [`EvalError::UnboundVariable`] if a variable has no binding.
    /// - [`EvalError::NotInvertible`] if a deferred inverse fails in `R`.
    pub fn evaluate(&self, factory: &R::Factory, bindings: &Bindings<R>) -> Result<R, EvalError> {
        let value = match self.node() {
            SymbolicNode::Zero => factory.zero(),
            SymbolicNode::Identity => factory.identity(),
            SymbolicNode::Constant(c) => c.clone(),
            SymbolicNode::Variable(id) => bindings
                .get(id)
                .cloned()
                .ok_or(EvalError::UnboundVariable(*id))?,
            SymbolicNode::Add(terms) => {
                let mut acc = factory.zero();
                for term in terms {
                    acc = acc.add(&term.evaluate(factory, bindings)?);
                }
                acc
            }
            SymbolicNode::Mul(factors) => {
                let mut acc = factory.identity();
                for f in factors {
                    acc = acc.multiply(&f.evaluate(factory, bindings)?);
                }
                acc
            }
            SymbolicNode::Neg(x) => x.evaluate(factory, bindings)?.negate(),
            SymbolicNode::InvertLeft(x) => x.evaluate(factory, bindings)?.invert_left()?,
            SymbolicNode::InvertRight(x) => x.evaluate(factory, bindings)?.invert_right()?,
        };
        Ok(value)
    }

    /// Replaces bound variables by expressions, re-simplifying on the way up.
    ///
    /// Variables without a replacement are kept.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NotInvertible`] if a substitution makes an
    /// inverse's operand zero.
    pub fn substitute(&self, replacements: &FxHashMap<SymbolId, Self>) -> Result<Self, EvalError> {
        let sub = |x: &Self| x.substitute(replacements);
        let result = match self.node() {
            SymbolicNode::Zero | SymbolicNode::Identity | SymbolicNode::Constant(_) => self.clone(),
            SymbolicNode::Variable(id) => replacements.get(id).cloned().unwrap_or_else(|| self.clone()),
            SymbolicNode::Add(terms) => Self::sum(terms.iter().map(sub).collect::<Result<Vec<_>, _>>()?),
            SymbolicNode::Mul(factors) => {
                Self::product(factors.iter().map(sub).collect::<Result<Vec<_>, _>>()?)
            }
            SymbolicNode::Neg(x) => sub(x)?.negate(),
            SymbolicNode::InvertLeft(x) => sub(x)?.invert_left()?,
            SymbolicNode::InvertRight(x) => sub(x)?.invert_right()?,
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplealg_rings::{NotInvertible, Quaternion, QuaternionFactory, F64Factory};

    type S = Symbolic<f64>;

    fn bind(pairs: &[(SymbolId, f64)]) -> Bindings<f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_evaluate() {
        let fac = F64Factory::new();
        let (a, b) = (S::variable(0), S::variable(1));
        // (a + 2) * invL(b)
        let e = a
            .add(&S::constant(2.0))
            .multiply(&b.invert_left().unwrap());

        let v = e.evaluate(&fac, &bind(&[(0, 4.0), (1, 3.0)])).unwrap();
        assert!((v - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unbound_variable() {
        let fac = F64Factory::new();
        let e = S::variable(0).add(&S::variable(5));
        assert_eq!(
            e.evaluate(&fac, &bind(&[(0, 1.0)])),
            Err(EvalError::UnboundVariable(5))
        );
    }

    #[test]
    fn test_deferred_inverse_fails() {
        let fac = F64Factory::new();
        let e = S::variable(0).invert_right().unwrap();
        assert_eq!(
            e.evaluate(&fac, &bind(&[(0, 0.0)])),
            Err(EvalError::NotInvertible(NotInvertible::Zero))
        );
    }

    #[test]
    fn test_evaluate_respects_order() {
        type H = Quaternion<f64>;
        let fac = QuaternionFactory::<f64>::new();
        let e = Symbolic::<H>::variable(0).multiply(&Symbolic::variable(1));
        let bindings: Bindings<H> = [(0, H::i()), (1, H::j())].into_iter().collect();
        assert_eq!(e.evaluate(&fac, &bindings), Ok(H::k()));
    }

    #[test]
    fn test_substitute() {
        let (a, b) = (S::variable(0), S::variable(1));
        let e = a.invert_left().unwrap().multiply(&b);

        let mut replacements = FxHashMap::default();
        replacements.insert(1, a.clone());
        assert!(e.substitute(&replacements).unwrap().is_identity());

        replacements.insert(0, S::zero());
        assert!(e.substitute(&replacements).is_err());
    }
}
