//! Trait-based API shared by the link-cut forest and the naive reference.

use crate::error::Result;

pub trait DynamicForest: Sized {
    type Value: Copy;

    fn from_values(values: &[Self::Value]) -> Self;
    fn len(&self) -> usize;
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add the edge `(u, v)`.
    ///
    /// Fails if `u` and `v` are already connected.
    fn link(&mut self, u: usize, v: usize) -> Result<()>;

    /// Remove the edge `(u, v)`.
    ///
    /// Fails if there is no such edge.
    fn cut(&mut self, u: usize, v: usize) -> Result<()>;

    fn connected(&mut self, u: usize, v: usize) -> Result<bool>;
}

pub trait PathQuery: DynamicForest {
    type Agg: Copy;

    fn value(&self, v: usize) -> Result<Self::Value>;
    fn update_value(&mut self, v: usize, value: Self::Value) -> Result<()>;

    /// Fold over the `u`–`v` path, from `u` to `v`.
    fn path_aggregate(&mut self, u: usize, v: usize) -> Result<Self::Agg>;
    fn path_len(&mut self, u: usize, v: usize) -> Result<usize>;
    fn path_kth(&mut self, u: usize, v: usize, k: usize) -> Result<usize>;
}
