//! Variable names and infix rendering.

use std::fmt;

use rustc_hash::FxHashMap;

use simplealg_rings::traits::RingElement;

use crate::expr::{SymbolId, Symbolic, SymbolicNode};

/// Maps variable names to ids and back.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    ids: FxHashMap<String, SymbolId>,
    names: Vec<String>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a name, returning its id. The same name always gets the same id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` names are interned.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        assert!(
            self.names.len() < u32::MAX as usize,
            "symbol table capacity exceeded"
        );

        #[allow(clippy::cast_possible_truncation)]
        let id = self.names.len() as SymbolId;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Interns a name and returns it as a variable.
    pub fn variable<R: RingElement>(&mut self, name: &str) -> Symbolic<R> {
        Symbolic::variable(self.intern(name))
    }

    /// Gets the name of a variable by its id.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Returns the number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no name has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An expression paired with a symbol table for display.
pub struct Named<'a, R: RingElement> {
    expr: &'a Symbolic<R>,
    table: Option<&'a SymbolTable>,
}

impl<R: RingElement> Symbolic<R> {
    /// Renders with variable names from `table`. Unknown ids print as `x<id>`.
    #[must_use]
    pub fn display_with<'a>(&'a self, table: &'a SymbolTable) -> Named<'a, R> {
        Named {
            expr: self,
            table: Some(table),
        }
    }
}

// Binding strength, loosest first.
const SUM: u8 = 1;
const NEG: u8 = 2;
const PRODUCT: u8 = 3;

fn write_expr<R>(
    f: &mut fmt::Formatter<'_>,
    expr: &Symbolic<R>,
    table: Option<&SymbolTable>,
    parent: u8,
) -> fmt::Result
where
    R: RingElement + fmt::Display,
{
    match expr.node() {
        SymbolicNode::Zero => f.write_str("0"),
        SymbolicNode::Identity => f.write_str("1"),
        SymbolicNode::Constant(c) => write!(f, "{c}"),
        SymbolicNode::Variable(id) => match table.and_then(|t| t.name(*id)) {
            Some(name) => f.write_str(name),
            None => write!(f, "x{id}"),
        },
        SymbolicNode::Add(terms) => {
            if parent > SUM {
                f.write_str("(")?;
            }
            for (i, term) in terms.iter().enumerate() {
                match (i, term.node()) {
                    (0, _) => write_expr(f, term, table, SUM)?,
                    (_, SymbolicNode::Neg(inner)) => {
                        f.write_str(" - ")?;
                        write_expr(f, inner, table, NEG)?;
                    }
                    _ => {
                        f.write_str(" + ")?;
                        write_expr(f, term, table, SUM)?;
                    }
                }
            }
            if parent > SUM {
                f.write_str(")")?;
            }
            Ok(())
        }
        SymbolicNode::Mul(factors) => {
            for (i, factor) in factors.iter().enumerate() {
                if i > 0 {
                    f.write_str("*")?;
                }
                write_expr(f, factor, table, PRODUCT)?;
            }
            Ok(())
        }
        SymbolicNode::Neg(inner) => {
            f.write_str("-")?;
            write_expr(f, inner, table, NEG)
        }
        SymbolicNode::InvertLeft(inner) => {
            f.write_str("invL(")?;
            write_expr(f, inner, table, 0)?;
            f.write_str(")")
        }
        SymbolicNode::InvertRight(inner) => {
            f.write_str("invR(")?;
            write_expr(f, inner, table, 0)?;
            f.write_str(")")
        }
    }
}

impl<R: RingElement + fmt::Display> fmt::Display for Symbolic<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, None, 0)
    }
}

impl<R: RingElement + fmt::Display> fmt::Display for Named<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.expr, self.table, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplealg_rings::Q;

    type S = Symbolic<Q>;

    #[test]
    fn test_intern() {
        let mut table = SymbolTable::new();
        let a = table.intern("a");
        let b = table.intern("b");
        assert_eq!(table.intern("a"), a);
        assert_ne!(a, b);
        assert_eq!(table.name(b), Some("b"));
        assert_eq!(table.name(9), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_display() {
        let (a, b, c) = (S::variable(0), S::variable(1), S::variable(2));
        assert_eq!(a.add(&b).multiply(&c).to_string(), "(x0 + x1)*x2");
        assert_eq!(a.subtract(&b).to_string(), "x0 - x1");
        assert_eq!(a.multiply(&b).negate().to_string(), "-x0*x1");
        assert_eq!(
            a.invert_left().unwrap().multiply(&b).to_string(),
            "invL(x0)*x1"
        );
        assert_eq!(S::constant(Q::new(1, 2)).add(&a).to_string(), "1/2 + x0");
        assert_eq!(S::zero().to_string(), "0");
        assert_eq!(S::identity().to_string(), "1");
    }

    #[test]
    fn test_display_with_names() {
        let mut table = SymbolTable::new();
        let m: S = table.variable("m");
        let v: S = table.variable("v");
        let e = m.invert_right().unwrap().negate().add(&v);
        assert_eq!(e.display_with(&table).to_string(), "-invR(m) + v");
        assert_eq!(S::variable(7).display_with(&table).to_string(), "x7");
    }
}
