//! Splay substrate shared by the forest.
//!
//! Each splay tree stores a contiguous segment of a path, keyed implicitly by
//! depth: in-order position equals depth along the path. The arena knows
//! nothing about forests; a node whose parent does not hold it as a child is
//! simply the root of its splay tree.

use crate::policy::PathMonoid;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Idx(u32);

impl Idx {
    #[inline(always)]
    pub(crate) fn new(v: usize) -> Self {
        debug_assert!(v < u32::MAX as usize);
        Self(v as u32)
    }

    #[inline(always)]
    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }
}

pub(crate) type Link = Option<Idx>;

struct Node<M: PathMonoid> {
    value: M::Value,
    // Both folds describe the subtree as stored, i.e. before any pending
    // reversal on this node is materialized.
    agg: M::Agg,
    agg_rev: M::Agg,
    size: u32,
    left: Link,
    right: Link,
    parent: Link,
    reversed: bool,
}

impl<M: PathMonoid> Node<M> {
    fn new(value: M::Value) -> Self {
        let agg = M::lift(&value);
        Self {
            value,
            agg,
            agg_rev: agg,
            size: 1,
            left: None,
            right: None,
            parent: None,
            reversed: false,
        }
    }
}

pub(crate) struct SplayArena<M: PathMonoid> {
    nodes: Vec<Node<M>>,
    stack: Vec<Idx>,
}

impl<M: PathMonoid> SplayArena<M> {
    pub(crate) fn new(values: &[M::Value]) -> Self {
        debug_assert!(values.len() < u32::MAX as usize);
        Self {
            nodes: values.iter().map(|&v| Node::new(v)).collect(),
            stack: Vec::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    fn node(&self, x: Idx) -> &Node<M> {
        &self.nodes[x.get()]
    }

    #[inline(always)]
    fn node_mut(&mut self, x: Idx) -> &mut Node<M> {
        &mut self.nodes[x.get()]
    }

    #[inline(always)]
    pub(crate) fn left(&self, x: Idx) -> Link {
        self.node(x).left
    }

    #[inline(always)]
    pub(crate) fn right(&self, x: Idx) -> Link {
        self.node(x).right
    }

    #[inline(always)]
    pub(crate) fn parent(&self, x: Idx) -> Link {
        self.node(x).parent
    }

    #[inline(always)]
    pub(crate) fn value(&self, x: Idx) -> M::Value {
        self.node(x).value
    }

    #[inline(always)]
    pub(crate) fn size(&self, x: Link) -> usize {
        x.map_or(0, |x| self.node(x).size as usize)
    }

    /// Fold of the subtree at `x` in logical (flag-applied) order.
    #[inline(always)]
    pub(crate) fn folded(&self, x: Link) -> M::Agg {
        match x {
            None => M::identity(),
            Some(x) => {
                let n = self.node(x);
                if n.reversed { n.agg_rev } else { n.agg }
            }
        }
    }

    #[inline(always)]
    fn folded_rev(&self, x: Link) -> M::Agg {
        match x {
            None => M::identity(),
            Some(x) => {
                let n = self.node(x);
                if n.reversed { n.agg } else { n.agg_rev }
            }
        }
    }

    pub(crate) fn set_left(&mut self, x: Idx, child: Link) {
        self.node_mut(x).left = child;
    }

    pub(crate) fn set_right(&mut self, x: Idx, child: Link) {
        self.node_mut(x).right = child;
    }

    pub(crate) fn set_parent(&mut self, x: Idx, parent: Link) {
        self.node_mut(x).parent = parent;
    }

    pub(crate) fn set_value(&mut self, x: Idx, value: M::Value) {
        self.node_mut(x).value = value;
    }

    /// `x` is the root of its splay tree: it has no parent, or its parent
    /// pointer is a path-parent pointer.
    #[inline(always)]
    pub(crate) fn is_root(&self, x: Idx) -> bool {
        match self.node(x).parent {
            None => true,
            Some(p) => {
                let pn = self.node(p);
                pn.left != Some(x) && pn.right != Some(x)
            }
        }
    }

    /// Mark the subtree at `x` as reversed without touching it.
    #[inline(always)]
    pub(crate) fn toggle(&mut self, x: Idx) {
        let n = self.node_mut(x);
        n.reversed = !n.reversed;
    }

    /// Materialize a pending reversal on `x` and hand it down to its children.
    pub(crate) fn push(&mut self, x: Idx) {
        let n = self.node_mut(x);
        if !n.reversed {
            return;
        }
        n.reversed = false;
        std::mem::swap(&mut n.left, &mut n.right);
        if !M::COMMUTATIVE {
            std::mem::swap(&mut n.agg, &mut n.agg_rev);
        }
        let (l, r) = (n.left, n.right);
        if let Some(l) = l {
            self.toggle(l);
        }
        if let Some(r) = r {
            self.toggle(r);
        }
    }

    /// Recompute `x`'s aggregates and size from its value and children.
    pub(crate) fn update(&mut self, x: Idx) {
        let (l, r, value) = {
            let n = self.node(x);
            (n.left, n.right, n.value)
        };
        let size = 1 + self.size(l) + self.size(r);
        let agg = M::combine(&self.folded(l), &value, &self.folded(r));
        let agg_rev = if M::COMMUTATIVE {
            agg
        } else {
            M::combine(&self.folded_rev(r), &value, &self.folded_rev(l))
        };
        let n = self.node_mut(x);
        n.size = size as u32;
        n.agg = agg;
        n.agg_rev = agg_rev;
    }

    /// Single rotation of `x` above its splay parent.
    ///
    /// Both `x` and its parent must already be pushed. When the parent is the
    /// root of its splay tree, `x` takes over its path-parent pointer.
    fn rotate(&mut self, x: Idx) {
        debug_assert!(!self.is_root(x));
        let Some(p) = self.node(x).parent else {
            return;
        };
        let g = self.node(p).parent;
        let p_was_root = self.is_root(p);

        let inner = if self.node(p).right == Some(x) {
            let inner = self.node(x).left;
            self.node_mut(p).right = inner;
            self.node_mut(x).left = Some(p);
            inner
        } else {
            let inner = self.node(x).right;
            self.node_mut(p).left = inner;
            self.node_mut(x).right = Some(p);
            inner
        };
        if let Some(c) = inner {
            self.node_mut(c).parent = Some(p);
        }
        self.node_mut(p).parent = Some(x);
        self.node_mut(x).parent = g;

        if let Some(g) = g.filter(|_| !p_was_root) {
            let gn = self.node_mut(g);
            if gn.left == Some(p) {
                gn.left = Some(x);
            } else {
                gn.right = Some(x);
            }
        }

        self.update(p);
        self.update(x);
    }

    /// Push every pending flag on the path from `x`'s splay root down to `x`.
    fn push_from_root(&mut self, x: Idx) {
        let mut stack = std::mem::take(&mut self.stack);
        stack.clear();
        let mut y = x;
        stack.push(y);
        while !self.is_root(y) {
            let Some(p) = self.node(y).parent else {
                break;
            };
            y = p;
            stack.push(y);
        }
        while let Some(y) = stack.pop() {
            self.push(y);
        }
        self.stack = stack;
    }

    /// Bring `x` to the root of its splay tree.
    pub(crate) fn splay(&mut self, x: Idx) {
        self.push_from_root(x);
        while !self.is_root(x) {
            let Some(p) = self.node(x).parent else {
                break;
            };
            if !self.is_root(p) {
                let Some(g) = self.node(p).parent else {
                    break;
                };
                let zig_zig = (self.node(g).left == Some(p)) == (self.node(p).left == Some(x));
                if zig_zig {
                    self.rotate(p);
                } else {
                    self.rotate(x);
                }
            }
            self.rotate(x);
        }
    }
}

#[cfg(test)]
impl<M: PathMonoid> SplayArena<M>
where
    M::Agg: PartialEq + std::fmt::Debug,
{
    /// Check pointer symmetry, sizes and stored aggregates of every node.
    pub(crate) fn assert_consistent(&self) {
        for i in 0..self.len() {
            let x = Idx::new(i);
            let n = self.node(x);
            for c in [n.left, n.right].into_iter().flatten() {
                assert_eq!(self.node(c).parent, Some(x), "child {} of {i}", c.get());
            }
            let size = 1 + self.size(n.left) + self.size(n.right);
            assert_eq!(n.size as usize, size, "size of {i}");
            let agg = M::combine(&self.folded(n.left), &n.value, &self.folded(n.right));
            assert_eq!(n.agg, agg, "aggregate of {i}");
            let agg_rev = M::combine(&self.folded_rev(n.right), &n.value, &self.folded_rev(n.left));
            assert_eq!(n.agg_rev, agg_rev, "reverse aggregate of {i}");
        }
    }

    pub(crate) fn is_flagged(&self, x: Idx) -> bool {
        self.node(x).reversed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Affine, Composite, PathMonoid, Sum};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Arrange `0..n` as one left-leaning splay tree rooted at `n - 1`.
    fn chain<M: PathMonoid>(values: &[M::Value]) -> SplayArena<M> {
        let mut arena = SplayArena::<M>::new(values);
        for i in 1..values.len() {
            let (x, c) = (Idx::new(i), Idx::new(i - 1));
            arena.set_left(x, Some(c));
            arena.set_parent(c, Some(x));
            arena.update(x);
        }
        arena
    }

    fn find_root<M: PathMonoid>(arena: &SplayArena<M>, x: Idx) -> Idx {
        let mut y = x;
        while !arena.is_root(y) {
            y = arena.parent(y).unwrap();
        }
        y
    }

    fn in_order<M: PathMonoid>(arena: &mut SplayArena<M>, root: Idx) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut cur = Some(root);
        loop {
            while let Some(x) = cur {
                arena.push(x);
                stack.push(x);
                cur = arena.left(x);
            }
            let Some(x) = stack.pop() else {
                break;
            };
            out.push(x.get());
            cur = arena.right(x);
        }
        out
    }

    #[test]
    fn splay_preserves_depth_order_and_sums() {
        let mut rng = StdRng::seed_from_u64(0x5_91A7_u64);
        let n = 64;
        let values = (0..n)
            .map(|_| rng.random_range(-100_i64..=100))
            .collect::<Vec<_>>();
        let total = values.iter().sum::<i64>();
        let mut arena = chain::<Sum>(&values);
        for _ in 0..500 {
            let x = Idx::new(rng.random_range(0..n));
            arena.splay(x);
            assert!(arena.is_root(x));
            assert_eq!(arena.folded(Some(x)), total);
            assert_eq!(arena.size(Some(x)), n);
        }
        let root = find_root(&arena, Idx::new(0));
        assert_eq!(in_order(&mut arena, root), (0..n).collect::<Vec<_>>());
        arena.assert_consistent();
    }

    #[test]
    fn toggled_tree_reads_back_reversed() {
        let mut rng = StdRng::seed_from_u64(0xF11D_u64);
        let n = 20;
        let maps = (0..n)
            .map(|_| Affine {
                a: rng.random_range(-2_i64..=2),
                b: rng.random_range(-5_i64..=5),
            })
            .collect::<Vec<_>>();
        let forward = maps
            .iter()
            .fold(Affine::IDENTITY, |acc, &f| f.after(acc));
        let backward = maps
            .iter()
            .rev()
            .fold(Affine::IDENTITY, |acc, &f| f.after(acc));

        let mut arena = chain::<Composite>(&maps);
        let root = Idx::new(n - 1);
        assert_eq!(arena.folded(Some(root)), forward);

        arena.toggle(root);
        assert_eq!(arena.folded(Some(root)), backward);

        // Splaying through the pending flag must respect it.
        for _ in 0..200 {
            let x = Idx::new(rng.random_range(0..n));
            arena.splay(x);
            assert_eq!(arena.folded(Some(x)), backward);
        }
        arena.assert_consistent();
        let root = find_root(&arena, Idx::new(0));
        assert_eq!(in_order(&mut arena, root), (0..n).rev().collect::<Vec<_>>());
    }

    #[test]
    fn splay_root_keeps_path_parent_pointer() {
        let values = vec![1_i64; 6];
        let mut arena = chain::<Sum>(&values[..5]);
        // A sixth node outside the chain stands in for a node on another path.
        arena.nodes.push(Node::new(1));
        let other = Idx::new(5);
        arena.set_parent(Idx::new(4), Some(other));

        arena.splay(Idx::new(0));
        assert!(arena.is_root(Idx::new(0)));
        assert_eq!(arena.parent(Idx::new(0)), Some(other));
        assert_eq!(arena.left(other), None);
        assert_eq!(arena.right(other), None);
        assert_eq!(arena.folded(Some(Idx::new(0))), 5);
        arena.assert_consistent();
    }
}
