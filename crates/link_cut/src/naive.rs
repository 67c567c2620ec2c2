//! Adjacency-list forest answering every query by BFS.
//!
//! `O(n)` per operation; used as a reference model and benchmark baseline.

use std::collections::VecDeque;

use crate::error::{InvalidOperation, Result};
use crate::policy::{PathMonoid, Sum};
use crate::traits::{DynamicForest, PathQuery};

pub struct NaiveForest<M: PathMonoid = Sum> {
    values: Vec<M::Value>,
    adj: Vec<Vec<usize>>,
}

impl<M: PathMonoid> NaiveForest<M> {
    pub fn new(n: usize) -> Self {
        Self::from_values(&vec![M::neutral_value(); n])
    }

    pub fn from_values(values: &[M::Value]) -> Self {
        Self {
            values: values.to_vec(),
            adj: vec![Vec::new(); values.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self, v: usize) -> Result<()> {
        if v < self.len() {
            Ok(())
        } else {
            Err(InvalidOperation::VertexOutOfRange {
                vertex: v,
                len: self.len(),
            })
        }
    }

    /// Vertices of the `s`–`t` path in order, or `None` if disconnected.
    pub fn path(&self, s: usize, t: usize) -> Option<Vec<usize>> {
        let n = self.len();
        let mut par = vec![usize::MAX; n];
        let mut q = VecDeque::new();
        par[s] = s;
        q.push_back(s);
        while let Some(v) = q.pop_front() {
            if v == t {
                break;
            }
            for &to in &self.adj[v] {
                if par[to] != usize::MAX {
                    continue;
                }
                par[to] = v;
                q.push_back(to);
            }
        }
        if par[t] == usize::MAX {
            return None;
        }
        let mut path = vec![t];
        let mut cur = t;
        while cur != s {
            cur = par[cur];
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }

    fn connected_path(&self, u: usize, v: usize) -> Result<Vec<usize>> {
        self.check(u)?;
        self.check(v)?;
        self.path(u, v).ok_or(InvalidOperation::Disconnected(u, v))
    }

    pub fn link(&mut self, u: usize, v: usize) -> Result<()> {
        self.check(u)?;
        self.check(v)?;
        if u == v {
            return Err(InvalidOperation::SelfLoop(u));
        }
        if self.path(u, v).is_some() {
            return Err(InvalidOperation::AlreadyConnected(u, v));
        }
        self.adj[u].push(v);
        self.adj[v].push(u);
        Ok(())
    }

    pub fn cut(&mut self, u: usize, v: usize) -> Result<()> {
        self.check(u)?;
        self.check(v)?;
        if u == v {
            return Err(InvalidOperation::SelfLoop(u));
        }
        let (Some(iu), Some(iv)) = (
            self.adj[u].iter().position(|&x| x == v),
            self.adj[v].iter().position(|&x| x == u),
        ) else {
            return Err(InvalidOperation::NotAnEdge(u, v));
        };
        self.adj[u].swap_remove(iu);
        self.adj[v].swap_remove(iv);
        Ok(())
    }

    pub fn connected(&self, u: usize, v: usize) -> Result<bool> {
        self.check(u)?;
        self.check(v)?;
        Ok(self.path(u, v).is_some())
    }

    pub fn value(&self, v: usize) -> Result<M::Value> {
        self.check(v)?;
        Ok(self.values[v])
    }

    pub fn update_value(&mut self, v: usize, value: M::Value) -> Result<()> {
        self.check(v)?;
        self.values[v] = value;
        Ok(())
    }

    pub fn path_aggregate(&self, u: usize, v: usize) -> Result<M::Agg> {
        let path = self.connected_path(u, v)?;
        Ok(path.into_iter().fold(M::identity(), |acc, x| {
            M::combine(&acc, &self.values[x], &M::identity())
        }))
    }

    pub fn path_len(&self, u: usize, v: usize) -> Result<usize> {
        Ok(self.connected_path(u, v)?.len())
    }

    pub fn path_kth(&self, u: usize, v: usize, k: usize) -> Result<usize> {
        let path = self.connected_path(u, v)?;
        path.get(k)
            .copied()
            .ok_or(InvalidOperation::PathIndexOutOfRange {
                index: k,
                len: path.len(),
            })
    }
}

impl<M: PathMonoid> DynamicForest for NaiveForest<M> {
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
        NaiveForest::connected(self, u, v)
    }
}

impl<M: PathMonoid> PathQuery for NaiveForest<M> {
    type Agg = M::Agg;

    fn value(&self, v: usize) -> Result<Self::Value> {
        self.value(v)
    }

    fn update_value(&mut self, v: usize, value: Self::Value) -> Result<()> {
        self.update_value(v, value)
    }

    fn path_aggregate(&mut self, u: usize, v: usize) -> Result<Self::Agg> {
        NaiveForest::path_aggregate(self, u, v)
    }

    fn path_len(&mut self, u: usize, v: usize) -> Result<usize> {
        NaiveForest::path_len(self, u, v)
    }

    fn path_kth(&mut self, u: usize, v: usize, k: usize) -> Result<usize> {
        NaiveForest::path_kth(self, u, v, k)
    }
}
