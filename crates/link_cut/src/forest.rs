use log::{debug, trace};

use crate::error::{InvalidOperation, Result};
use crate::policy::{PathMonoid, Sum};
use crate::splay::{Idx, SplayArena};
use crate::traits::{DynamicForest, PathQuery};

const LOG_TARGET: &str = "link_cut";

/// Link-cut forest over vertices `0..n`.
///
/// Every represented tree is decomposed into preferred paths, one splay tree
/// per path. A splay root's parent pointer, when present, is a path-parent
/// pointer: a forest edge to the path above. All operations are amortized
/// `O(log n)`.
///
/// Contract violations (bad vertex ids, linking inside a tree, cutting a
/// non-edge, querying across trees) are reported as [`InvalidOperation`] and
/// leave the edge set unchanged. Operations that expose a path may re-root
/// the tree they touch.
pub struct LinkCutForest<M: PathMonoid = Sum> {
    arena: SplayArena<M>,
}

impl<M: PathMonoid> LinkCutForest<M> {
    /// `n` isolated vertices, each holding `M::neutral_value()`.
    pub fn new(n: usize) -> Self {
        Self::from_values(&vec![M::neutral_value(); n])
    }

    pub fn from_values(values: &[M::Value]) -> Self {
        debug!(target: LOG_TARGET, "building forest of {} vertices", values.len());
        Self {
            arena: SplayArena::new(values),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    fn reject<T>(&self, op: &str, err: InvalidOperation) -> Result<T> {
        debug!(target: LOG_TARGET, "{op} rejected: {err}");
        Err(err)
    }

    fn vertex(&self, op: &str, v: usize) -> Result<Idx> {
        if v < self.len() {
            Ok(Idx::new(v))
        } else {
            self.reject(
                op,
                InvalidOperation::VertexOutOfRange {
                    vertex: v,
                    len: self.len(),
                },
            )
        }
    }

    /// Make the root-to-`x` path preferred and splay `x` to the top of it.
    ///
    /// Returns the last path-root the walk joined, which after a previous
    /// `access(u)` is the lowest common ancestor of `u` and `x`.
    fn access(&mut self, x: Idx) -> Idx {
        let mut below = None;
        let mut joined = x;
        let mut cur = Some(x);
        while let Some(y) = cur {
            self.arena.splay(y);
            self.arena.set_right(y, below);
            self.arena.update(y);
            below = Some(y);
            joined = y;
            cur = self.arena.parent(y);
        }
        self.arena.splay(x);
        joined
    }

    fn evert(&mut self, x: Idx) {
        self.access(x);
        self.arena.toggle(x);
        self.arena.push(x);
    }

    fn root_of(&mut self, x: Idx) -> Idx {
        self.access(x);
        let mut y = x;
        loop {
            self.arena.push(y);
            match self.arena.left(y) {
                Some(l) => y = l,
                None => break,
            }
        }
        self.arena.splay(y);
        y
    }

    /// Expose the `x`–`y` path as the splay tree rooted at `y`, ordered from
    /// `x` to `y`. Returns whether the two are connected.
    fn expose(&mut self, x: Idx, y: Idx) -> bool {
        self.evert(x);
        self.access(y);
        x == y || self.arena.parent(x).is_some()
    }

    fn expose_connected(&mut self, op: &str, u: usize, v: usize) -> Result<Idx> {
        let x = self.vertex(op, u)?;
        let y = self.vertex(op, v)?;
        if self.expose(x, y) {
            Ok(y)
        } else {
            self.reject(op, InvalidOperation::Disconnected(u, v))
        }
    }

    /// Re-root `v`'s tree at `v`.
    pub fn make_root(&mut self, v: usize) -> Result<()> {
        let x = self.vertex("make_root", v)?;
        self.evert(x);
        Ok(())
    }

    /// Current root of `v`'s tree.
    pub fn find_root(&mut self, v: usize) -> Result<usize> {
        let x = self.vertex("find_root", v)?;
        Ok(self.root_of(x).get())
    }

    pub fn connected(&mut self, u: usize, v: usize) -> Result<bool> {
        let x = self.vertex("connected", u)?;
        let y = self.vertex("connected", v)?;
        if x == y {
            return Ok(true);
        }
        Ok(self.root_of(x) == self.root_of(y))
    }

    /// Add the edge `(u, v)`, making `u` a child of `v`.
    ///
    /// `u`'s tree is re-rooted at `u` first; `v`'s tree keeps its root.
    pub fn link(&mut self, u: usize, v: usize) -> Result<()> {
        let x = self.vertex("link", u)?;
        let y = self.vertex("link", v)?;
        if x == y {
            return self.reject("link", InvalidOperation::SelfLoop(u));
        }
        if self.root_of(x) == self.root_of(y) {
            return self.reject("link", InvalidOperation::AlreadyConnected(u, v));
        }
        self.evert(x);
        self.arena.set_parent(x, Some(y));
        trace!(target: LOG_TARGET, "link({u}, {v})");
        Ok(())
    }

    /// Remove the edge `(u, v)`.
    pub fn cut(&mut self, u: usize, v: usize) -> Result<()> {
        let x = self.vertex("cut", u)?;
        let y = self.vertex("cut", v)?;
        if x == y {
            return self.reject("cut", InvalidOperation::SelfLoop(u));
        }
        self.evert(x);
        self.access(y);
        // Adjacent iff the exposed path is exactly `u`, `v`.
        if self.arena.left(y) != Some(x) || self.arena.size(Some(x)) != 1 {
            return self.reject("cut", InvalidOperation::NotAnEdge(u, v));
        }
        self.arena.set_left(y, None);
        self.arena.set_parent(x, None);
        self.arena.update(y);
        trace!(target: LOG_TARGET, "cut({u}, {v})");
        Ok(())
    }

    pub fn value(&self, v: usize) -> Result<M::Value> {
        let x = self.vertex("value", v)?;
        Ok(self.arena.value(x))
    }

    pub fn update_value(&mut self, v: usize, value: M::Value) -> Result<()> {
        let x = self.vertex("update_value", v)?;
        self.access(x);
        self.arena.set_value(x, value);
        self.arena.update(x);
        Ok(())
    }

    /// Fold of the values on the `u`–`v` path, in order from `u` to `v`.
    ///
    /// Leaves `v`'s tree rooted at `u`.
    pub fn path_aggregate(&mut self, u: usize, v: usize) -> Result<M::Agg> {
        let y = self.expose_connected("path_aggregate", u, v)?;
        Ok(self.arena.folded(Some(y)))
    }

    /// Number of vertices on the `u`–`v` path.
    pub fn path_len(&mut self, u: usize, v: usize) -> Result<usize> {
        let y = self.expose_connected("path_len", u, v)?;
        Ok(self.arena.size(Some(y)))
    }

    /// The `k`-th vertex (0-based) on the path from `u` to `v`.
    pub fn path_kth(&mut self, u: usize, v: usize, k: usize) -> Result<usize> {
        let y = self.expose_connected("path_kth", u, v)?;
        let len = self.arena.size(Some(y));
        if k >= len {
            return self.reject(
                "path_kth",
                InvalidOperation::PathIndexOutOfRange { index: k, len },
            );
        }
        let mut x = y;
        let mut k = k;
        loop {
            self.arena.push(x);
            let left = self.arena.left(x);
            let left_size = self.arena.size(left);
            match (k.cmp(&left_size), left, self.arena.right(x)) {
                (std::cmp::Ordering::Less, Some(l), _) => x = l,
                (std::cmp::Ordering::Greater, _, Some(r)) => {
                    k -= left_size + 1;
                    x = r;
                }
                _ => break,
            }
        }
        self.arena.splay(x);
        Ok(x.get())
    }

    /// Lowest common ancestor of `u` and `v` under the current roots.
    pub fn lca(&mut self, u: usize, v: usize) -> Result<usize> {
        if !self.connected(u, v)? {
            return self.reject("lca", InvalidOperation::Disconnected(u, v));
        }
        let (x, y) = (Idx::new(u), Idx::new(v));
        self.access(x);
        Ok(self.access(y).get())
    }
}

impl LinkCutForest<Sum> {
    pub fn path_sum(&mut self, u: usize, v: usize) -> Result<i64> {
        self.path_aggregate(u, v)
    }
}

#[cfg(test)]
impl<M: PathMonoid> LinkCutForest<M>
where
    M::Agg: PartialEq + std::fmt::Debug,
{
    pub(crate) fn assert_consistent(&self) {
        self.arena.assert_consistent();
    }
}

impl<M: PathMonoid> DynamicForest for LinkCutForest<M> {
    type Value = M::Value;

    fn from_values(values: &[Self::Value]) -> Self {
        Self::from_values(values)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn link(&mut self, u: usize, v: usize) -> Result<()> {
        self.link(u, v)
    }

    fn cut(&mut self, u: usize, v: usize) -> Result<()> {
        self.cut(u, v)
    }

    fn connected(&mut self, u: usize, v: usize) -> Result<bool> {
        self.connected(u, v)
    }
}

impl<M: PathMonoid> PathQuery for LinkCutForest<M> {
    type Agg = M::Agg;

    fn value(&self, v: usize) -> Result<Self::Value> {
        self.value(v)
    }

    fn update_value(&mut self, v: usize, value: Self::Value) -> Result<()> {
        self.update_value(v, value)
    }

    fn path_aggregate(&mut self, u: usize, v: usize) -> Result<Self::Agg> {
        self.path_aggregate(u, v)
    }

    fn path_len(&mut self, u: usize, v: usize) -> Result<usize> {
        self.path_len(u, v)
    }

    fn path_kth(&mut self, u: usize, v: usize, k: usize) -> Result<usize> {
        self.path_kth(u, v, k)
    }
}
