use std::collections::VecDeque;
use std::ops::RangeInclusive;

use bench::rng_for;
use rand::Rng;

pub const SIZES: [usize; 4] = [1_024, 4_096, 16_384, 65_536];
/// The BFS baseline is only run up to this size.
pub const NAIVE_MAX_SIZE: usize = 4_096;
pub const OPS_PER_SIZE: usize = 5_000;
pub const VALUE_RANGE: RangeInclusive<i64> = -1_000_000_000..=1_000_000_000;

#[derive(Clone, Copy, Debug)]
pub enum ConnOp {
    Link { u: usize, v: usize },
    Cut { u: usize, v: usize },
    Connected { u: usize, v: usize },
}

#[derive(Clone, Copy, Debug)]
pub enum PathOp {
    Update {
        v: usize,
        value: i64,
    },
    PathSum {
        u: usize,
        v: usize,
    },
    EdgeSwap {
        cut_u: usize,
        cut_v: usize,
        link_u: usize,
        link_v: usize,
    },
}

#[derive(Clone, Debug)]
pub struct Case<Op> {
    pub values: Vec<i64>,
    pub edges: Vec<(usize, usize)>,
    pub ops: Vec<Op>,
}

/// Forest bookkeeping used only to keep generated operations valid.
struct Shadow {
    adj: Vec<Vec<usize>>,
    comp: Vec<usize>,
    members: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Shadow {
    fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            comp: (0..n).collect(),
            members: (0..n).map(|v| vec![v]).collect(),
            edges: Vec::new(),
        }
    }

    fn link(&mut self, u: usize, v: usize) {
        debug_assert_ne!(self.comp[u], self.comp[v]);
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.edges.push((u, v));
        let (mut keep, mut gone) = (self.comp[u], self.comp[v]);
        if self.members[keep].len() < self.members[gone].len() {
            std::mem::swap(&mut keep, &mut gone);
        }
        for x in std::mem::take(&mut self.members[gone]) {
            self.comp[x] = keep;
            self.members[keep].push(x);
        }
    }

    fn cut_random(&mut self, rng: &mut impl Rng) -> (usize, usize) {
        let (u, v) = self.edges.swap_remove(rng.random_range(0..self.edges.len()));
        for (a, b) in [(u, v), (v, u)] {
            let pos = self.adj[a].iter().position(|&x| x == b).unwrap_or(0);
            self.adj[a].swap_remove(pos);
        }

        // Relabel the side of `v` into a fresh component.
        let old = self.comp[u];
        let fresh = self.members.len();
        let mut side = Vec::new();
        let mut q = VecDeque::from([v]);
        self.comp[v] = fresh;
        while let Some(x) = q.pop_front() {
            side.push(x);
            for &y in &self.adj[x] {
                if self.comp[y] != fresh {
                    self.comp[y] = fresh;
                    q.push_back(y);
                }
            }
        }
        self.members[old].retain(|&x| self.comp[x] == old);
        self.members.push(side);
        (u, v)
    }

    fn random_in(&self, rng: &mut impl Rng, comp: usize) -> usize {
        let list = &self.members[comp];
        list[rng.random_range(0..list.len())]
    }

    fn two_components(&self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        let n = self.comp.len();
        let a = self.comp[rng.random_range(0..n)];
        for _ in 0..100 {
            let b = self.comp[rng.random_range(0..n)];
            if a != b {
                return Some((a, b));
            }
        }
        self.comp.iter().find(|&&b| b != a).map(|&b| (a, b))
    }
}

fn random_tree(rng: &mut impl Rng, shadow: &mut Shadow) {
    for i in 1..shadow.comp.len() {
        let parent = rng.random_range(0..i);
        shadow.link(i, parent);
    }
}

pub fn generate_connectivity_case(n: usize) -> Case<ConnOp> {
    let mut rng = rng_for(1, n);
    let mut shadow = Shadow::new(n);
    random_tree(&mut rng, &mut shadow);
    for _ in 0..n / 4 {
        shadow.cut_random(&mut rng);
    }
    let edges = shadow.edges.clone();

    let mut ops = Vec::with_capacity(OPS_PER_SIZE);
    for _ in 0..OPS_PER_SIZE {
        let roll = rng.random_range(0..100_u32);
        let linked = if (50..75).contains(&roll) {
            shadow.two_components(&mut rng).map(|(ca, cb)| {
                let u = shadow.random_in(&mut rng, ca);
                let v = shadow.random_in(&mut rng, cb);
                shadow.link(u, v);
                ConnOp::Link { u, v }
            })
        } else if roll >= 75 && !shadow.edges.is_empty() {
            let (u, v) = shadow.cut_random(&mut rng);
            Some(ConnOp::Cut { u, v })
        } else {
            None
        };
        ops.push(linked.unwrap_or_else(|| ConnOp::Connected {
            u: rng.random_range(0..n),
            v: rng.random_range(0..n),
        }));
    }

    Case {
        values: vec![0; n],
        edges,
        ops,
    }
}

pub fn generate_path_case(n: usize) -> Case<PathOp> {
    let mut rng = rng_for(2, n);
    let values = (0..n).map(|_| rng.random_range(VALUE_RANGE)).collect();
    let mut shadow = Shadow::new(n);
    random_tree(&mut rng, &mut shadow);
    let edges = shadow.edges.clone();

    let mut ops = Vec::with_capacity(OPS_PER_SIZE);
    for _ in 0..OPS_PER_SIZE {
        let roll = rng.random_range(0..100_u32);
        if roll < 30 {
            let v = rng.random_range(0..n);
            let value = rng.random_range(VALUE_RANGE);
            ops.push(PathOp::Update { v, value });
        } else if roll < 70 || shadow.edges.is_empty() {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            ops.push(PathOp::PathSum { u, v });
        } else {
            let (cut_u, cut_v) = shadow.cut_random(&mut rng);
            let (ca, cb) = (shadow.comp[cut_u], shadow.comp[cut_v]);
            let link_u = shadow.random_in(&mut rng, ca);
            let link_v = shadow.random_in(&mut rng, cb);
            shadow.link(link_u, link_v);
            ops.push(PathOp::EdgeSwap {
                cut_u,
                cut_v,
                link_u,
                link_v,
            });
        }
    }

    Case { values, edges, ops }
}
