//! Aggregate policies folded along forest paths.
//!
//! A policy describes a monoid over per-vertex values. Paths are folded in
//! depth order, so policies whose `combine` is order sensitive must set
//! `COMMUTATIVE = false`; the forest then keeps a reverse-order aggregate per
//! node so re-rooting stays correct.

/// A monoid folded over a depth-ordered sequence of vertex values.
pub trait PathMonoid {
    type Value: Copy;
    type Agg: Copy;

    /// Whether the aggregate is invariant under sequence reversal.
    const COMMUTATIVE: bool;

    /// Value given to every vertex by `LinkCutForest::new`.
    fn neutral_value() -> Self::Value;

    /// Aggregate of the empty sequence.
    fn identity() -> Self::Agg;

    fn lift(value: &Self::Value) -> Self::Agg;

    /// Fold `left ++ [value] ++ right`.
    fn combine(left: &Self::Agg, value: &Self::Value, right: &Self::Agg) -> Self::Agg;
}

/// Path sum over `i64` with wrapping addition.
#[derive(Clone, Copy, Debug)]
pub enum Sum {}

impl PathMonoid for Sum {
    type Value = i64;
    type Agg = i64;

    const COMMUTATIVE: bool = true;

    #[inline(always)]
    fn neutral_value() -> Self::Value {
        0
    }

    #[inline(always)]
    fn identity() -> Self::Agg {
        0
    }

    #[inline(always)]
    fn lift(value: &Self::Value) -> Self::Agg {
        *value
    }

    #[inline(always)]
    fn combine(left: &Self::Agg, value: &Self::Value, right: &Self::Agg) -> Self::Agg {
        left.wrapping_add(*value).wrapping_add(*right)
    }
}

/// Path minimum over `i64`.
#[derive(Clone, Copy, Debug)]
pub enum Min {}

impl PathMonoid for Min {
    type Value = i64;
    type Agg = i64;

    const COMMUTATIVE: bool = true;

    #[inline(always)]
    fn neutral_value() -> Self::Value {
        i64::MAX
    }

    #[inline(always)]
    fn identity() -> Self::Agg {
        i64::MAX
    }

    #[inline(always)]
    fn lift(value: &Self::Value) -> Self::Agg {
        *value
    }

    #[inline(always)]
    fn combine(left: &Self::Agg, value: &Self::Value, right: &Self::Agg) -> Self::Agg {
        (*left).min(*value).min(*right)
    }
}

/// Path maximum over `i64`.
#[derive(Clone, Copy, Debug)]
pub enum Max {}

impl PathMonoid for Max {
    type Value = i64;
    type Agg = i64;

    const COMMUTATIVE: bool = true;

    #[inline(always)]
    fn neutral_value() -> Self::Value {
        i64::MIN
    }

    #[inline(always)]
    fn identity() -> Self::Agg {
        i64::MIN
    }

    #[inline(always)]
    fn lift(value: &Self::Value) -> Self::Agg {
        *value
    }

    #[inline(always)]
    fn combine(left: &Self::Agg, value: &Self::Value, right: &Self::Agg) -> Self::Agg {
        (*left).max(*value).max(*right)
    }
}

/// The affine map `x -> a * x + b` under wrapping arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine {
    pub a: i64,
    pub b: i64,
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1, b: 0 };

    /// `self ∘ inner`: apply `inner` first.
    #[inline(always)]
    pub fn after(self, inner: Self) -> Self {
        Self {
            a: self.a.wrapping_mul(inner.a),
            b: self.a.wrapping_mul(inner.b).wrapping_add(self.b),
        }
    }

    #[inline(always)]
    pub fn eval(self, x: i64) -> i64 {
        self.a.wrapping_mul(x).wrapping_add(self.b)
    }
}

/// Composition of per-vertex affine maps, applied from the path's first
/// vertex to its last. Order sensitive.
#[derive(Clone, Copy, Debug)]
pub enum Composite {}

impl PathMonoid for Composite {
    type Value = Affine;
    type Agg = Affine;

    const COMMUTATIVE: bool = false;

    #[inline(always)]
    fn neutral_value() -> Self::Value {
        Affine::IDENTITY
    }

    #[inline(always)]
    fn identity() -> Self::Agg {
        Affine::IDENTITY
    }

    #[inline(always)]
    fn lift(value: &Self::Value) -> Self::Agg {
        *value
    }

    #[inline(always)]
    fn combine(left: &Self::Agg, value: &Self::Value, right: &Self::Agg) -> Self::Agg {
        // Sequence: left, value, right. Composite: right ∘ value ∘ left.
        right.after(value.after(*left))
    }
}
