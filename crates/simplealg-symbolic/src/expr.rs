//! Symbolic expression nodes.
//!
//! A [`Symbolic<R>`] is an immutable expression tree over a base ring `R`.
//! Subtrees are shared through `Arc`, so cloning is cheap and the type can
//! cross threads like any other ring element.
//!
//! Every constructor simplifies locally. None of the rules reorders
//! operands of a product, so they hold in non-commutative rings.

use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use simplealg_rings::traits::{ApproxEq, RingElement, RingFactory};
use simplealg_rings::NotInvertible;

/// Unique identifier for a variable.
pub type SymbolId = u32;

/// Operand list of a sum or a product.
pub type Operands<R> = SmallVec<[Symbolic<R>; 4]>;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicNode<R: RingElement> {
    // === Atoms ===
    /// The additive identity.
    Zero,

    /// The multiplicative identity.
    Identity,

    /// A value of the base ring. Never zero or the identity.
    Constant(R),

    /// A free variable.
    Variable(SymbolId),

    // === Compound Expressions ===
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 operands, none of them zero or a sum.
    Add(Operands<R>),

    /// Product of expressions in the given order: a * b * c * ...
    ///
    /// Invariant: at least 2 operands, none of them zero, the identity,
    /// a negation, or a product.
    Mul(Operands<R>),

    /// Negation: -expr.
    Neg(Symbolic<R>),

    /// Left inverse: the `y` with `y * expr == 1`.
    InvertLeft(Symbolic<R>),

    /// Right inverse: the `y` with `expr * y == 1`.
    InvertRight(Symbolic<R>),
}

/// A symbolic element of the ring `R`.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbolic<R: RingElement>(Arc<SymbolicNode<R>>);

impl<R: RingElement> Symbolic<R> {
    fn from_node(node: SymbolicNode<R>) -> Self {
        Self(Arc::new(node))
    }

    /// Returns the symbolic zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_node(SymbolicNode::Zero)
    }

    /// Returns the symbolic identity.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_node(SymbolicNode::Identity)
    }

    /// Wraps a base ring value. Zero and the identity of `R` become the
    /// symbolic zero and identity.
    #[must_use]
    pub fn constant(value: R) -> Self {
        if value.is_zero() {
            Self::zero()
        } else if value.is_identity() {
            Self::identity()
        } else {
            Self::from_node(SymbolicNode::Constant(value))
        }
    }

    /// Returns the variable with the given id.
    #[must_use]
    pub fn variable(id: SymbolId) -> Self {
        Self::from_node(SymbolicNode::Variable(id))
    }

    /// Returns the root node.
    #[must_use]
    pub fn node(&self) -> &SymbolicNode<R> {
        &self.0
    }

    /// Builds a simplified sum.
    ///
    /// Nested sums are flattened and zeros dropped. Adjacent constants are
    /// folded, and adjacent `x` and `-x` cancel.
    #[must_use]
    pub fn sum<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut acc = Operands::new();
        for term in terms {
            match term.node() {
                SymbolicNode::Add(inner) => {
                    for t in inner {
                        push_term(&mut acc, t.clone());
                    }
                }
                _ => push_term(&mut acc, term.clone()),
            }
        }
        match acc.len() {
            0 => Self::zero(),
            1 => acc.swap_remove(0),
            _ => Self::from_node(SymbolicNode::Add(acc)),
        }
    }

    /// Builds a simplified product. Operand order is kept.
    ///
    /// Nested products are flattened and identities dropped; any zero
    /// factor yields zero. Negations are pulled out front. Adjacent
    /// constants are folded, and `invL(x) * x` and `x * invR(x)` cancel,
    /// also when `x` is itself a product.
    #[must_use]
    pub fn product<I>(factors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut acc = Operands::new();
        let mut negative = false;
        for factor in factors {
            let mut factor = factor;
            while let SymbolicNode::Neg(inner) = factor.node() {
                factor = inner.clone();
                negative = !negative;
            }

            let alive = match factor.node() {
                SymbolicNode::Zero => false,
                SymbolicNode::Mul(inner) => inner.iter().all(|f| push_factor(&mut acc, f.clone())),
                _ => push_factor(&mut acc, factor.clone()),
            };
            if !alive {
                return Self::zero();
            }
        }

        let product = match acc.len() {
            0 => Self::identity(),
            1 => acc.swap_remove(0),
            _ => Self::from_node(SymbolicNode::Mul(acc)),
        };
        if negative {
            product.negate()
        } else {
            product
        }
    }

    /// Returns the direct children of the root node.
    #[must_use]
    pub fn children(&self) -> Operands<R> {
        match self.node() {
            SymbolicNode::Zero
            | SymbolicNode::Identity
            | SymbolicNode::Constant(_)
            | SymbolicNode::Variable(_) => SmallVec::new(),
            SymbolicNode::Add(args) | SymbolicNode::Mul(args) => args.clone(),
            SymbolicNode::Neg(arg)
            | SymbolicNode::InvertLeft(arg)
            | SymbolicNode::InvertRight(arg) => smallvec::smallvec![arg.clone()],
        }
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }

    /// Returns the set of variables appearing in the tree.
    #[must_use]
    pub fn free_variables(&self) -> FxHashSet<SymbolId> {
        let mut vars = FxHashSet::default();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut FxHashSet<SymbolId>) {
        if let SymbolicNode::Variable(id) = self.node() {
            vars.insert(*id);
        }
        for child in self.children() {
            child.collect_variables(vars);
        }
    }

    fn is_negation_of(&self, other: &Self) -> bool {
        matches!(self.node(), SymbolicNode::Neg(x) if x == other)
            || matches!(other.node(), SymbolicNode::Neg(x) if x == self)
    }
}

/// A constant, or the identity up to sign.
enum Scalar<'a, R> {
    Value(&'a R),
    One { negative: bool },
}

fn scalar<R: RingElement>(x: &Symbolic<R>) -> Option<Scalar<'_, R>> {
    match x.node() {
        SymbolicNode::Constant(c) => Some(Scalar::Value(c)),
        SymbolicNode::Identity => Some(Scalar::One { negative: false }),
        SymbolicNode::Neg(inner) if inner.is_identity() => Some(Scalar::One { negative: true }),
        _ => None,
    }
}

/// Base ring values of two adjacent operands, if both are scalars and at
/// least one is a constant. The constant supplies the ring for the other.
fn constant_pair<R: RingElement>(a: &Symbolic<R>, b: &Symbolic<R>) -> Option<(R, R)> {
    let (a, b) = (scalar(a)?, scalar(b)?);
    let ring = match (&a, &b) {
        (Scalar::Value(c), _) | (_, Scalar::Value(c)) => c.parent(),
        _ => return None,
    };
    let value = |s: Scalar<'_, R>| match s {
        Scalar::Value(c) => c.clone(),
        Scalar::One { negative: false } => ring.identity(),
        Scalar::One { negative: true } => ring.identity().negate(),
    };
    Some((value(a), value(b)))
}

/// The factors of `x` in order: its operands if it is a product, else `x`.
fn factors_of<R: RingElement>(x: &Symbolic<R>) -> &[Symbolic<R>] {
    match x.node() {
        SymbolicNode::Mul(inner) => inner.as_slice(),
        _ => std::slice::from_ref(x),
    }
}

/// Appends a term to a sum under construction.
fn push_term<R: RingElement>(acc: &mut Operands<R>, term: Symbolic<R>) {
    if term.is_zero() {
        return;
    }
    if let Some(top) = acc.last() {
        if let Some((a, b)) = constant_pair(top, &term) {
            let folded = Symbolic::constant(a.add(&b));
            acc.pop();
            if !folded.is_zero() {
                acc.push(folded);
            }
            return;
        }
        if top.is_negation_of(&term) {
            acc.pop();
            return;
        }
    }
    acc.push(term);
}

/// Appends a factor to a product under construction. Returns false if the
/// product collapsed to zero.
fn push_factor<R: RingElement>(acc: &mut Operands<R>, factor: Symbolic<R>) -> bool {
    if factor.is_identity() {
        return true;
    }
    if let Some(top) = acc.last() {
        if let (SymbolicNode::Constant(a), SymbolicNode::Constant(b)) = (top.node(), factor.node()) {
            let folded = Symbolic::constant(a.multiply(b));
            acc.pop();
            if folded.is_zero() {
                return false;
            }
            return push_factor(acc, folded);
        }
    }

    // x1 .. xk * invR(x1 .. xk)
    if let SymbolicNode::InvertRight(x) = factor.node() {
        let run = factors_of(x);
        if acc.ends_with(run) {
            acc.truncate(acc.len() - run.len());
            return true;
        }
    }

    acc.push(factor);
    cancel_left_inverse(acc);
    true
}

/// Drops a trailing `invL(x1 .. xk) * x1 .. xk` from a product under
/// construction.
fn cancel_left_inverse<R: RingElement>(acc: &mut Operands<R>) {
    let len = acc.len();
    for start in (0..len.saturating_sub(1)).rev() {
        if let SymbolicNode::InvertLeft(x) = acc[start].node() {
            let run = factors_of(x);
            if run.len() == len - start - 1 && acc[start + 1..] == *run {
                acc.truncate(start);
                return;
            }
        }
    }
}

/// Factory for [`Symbolic`] elements over `R`.
#[derive(Clone, Debug)]
pub struct SymbolicFactory<R>(PhantomData<fn() -> R>);

impl<R> SymbolicFactory<R> {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for SymbolicFactory<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RingElement> RingFactory for SymbolicFactory<R> {
    type Element = Symbolic<R>;

    fn zero(&self) -> Symbolic<R> {
        Symbolic::zero()
    }

    fn identity(&self) -> Symbolic<R> {
        Symbolic::identity()
    }
}

impl<R: RingElement> RingElement for Symbolic<R> {
    type Factory = SymbolicFactory<R>;

    fn add(&self, other: &Self) -> Self {
        Self::sum([self.clone(), other.clone()])
    }

    fn negate(&self) -> Self {
        match self.node() {
            SymbolicNode::Zero => self.clone(),
            SymbolicNode::Neg(x) => x.clone(),
            SymbolicNode::Constant(c) => Self::constant(c.negate()),
            SymbolicNode::Add(terms) => Self::sum(terms.iter().map(RingElement::negate)),
            _ => Self::from_node(SymbolicNode::Neg(self.clone())),
        }
    }

    fn multiply(&self, other: &Self) -> Self {
        Self::product([self.clone(), other.clone()])
    }

    fn invert_left(&self) -> Result<Self, NotInvertible> {
        match self.node() {
            SymbolicNode::Zero => Err(NotInvertible::Zero),
            SymbolicNode::Identity => Ok(self.clone()),
            SymbolicNode::Constant(c) => c.invert_left().map(Self::constant),
            SymbolicNode::Neg(x) => Ok(x.invert_left()?.negate()),
            // x * invR(x) == 1, so x is the left inverse of invR(x).
            SymbolicNode::InvertRight(x) => Ok(x.clone()),
            _ => Ok(Self::from_node(SymbolicNode::InvertLeft(self.clone()))),
        }
    }

    fn invert_right(&self) -> Result<Self, NotInvertible> {
        match self.node() {
            SymbolicNode::Zero => Err(NotInvertible::Zero),
            SymbolicNode::Identity => Ok(self.clone()),
            SymbolicNode::Constant(c) => c.invert_right().map(Self::constant),
            SymbolicNode::Neg(x) => Ok(x.invert_right()?.negate()),
            SymbolicNode::InvertLeft(x) => Ok(x.clone()),
            _ => Ok(Self::from_node(SymbolicNode::InvertRight(self.clone()))),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(*self.0, SymbolicNode::Zero)
    }

    fn parent(&self) -> SymbolicFactory<R> {
        SymbolicFactory::new()
    }

    fn is_identity(&self) -> bool {
        matches!(*self.0, SymbolicNode::Identity)
    }
}

/// Structural comparison, with constants compared approximately.
impl<R: RingElement + ApproxEq> ApproxEq for Symbolic<R> {
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        use SymbolicNode as N;

        match (self.node(), other.node()) {
            (N::Constant(a), N::Constant(b)) => a.approx_eq(b, tolerance),
            (N::Constant(c), N::Identity) | (N::Identity, N::Constant(c)) => {
                c.approx_eq(&c.parent().identity(), tolerance)
            }
            (N::Add(a), N::Add(b)) | (N::Mul(a), N::Mul(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y, tolerance))
            }
            (N::Neg(a), N::Neg(b))
            | (N::InvertLeft(a), N::InvertLeft(b))
            | (N::InvertRight(a), N::InvertRight(b)) => a.approx_eq(b, tolerance),
            (a, b) => a == b,
        }
    }
}
