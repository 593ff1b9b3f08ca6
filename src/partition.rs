use crate::error::{BisectionError, Result};
use crate::graph::{Graph, VertexId};
use crate::group::VertexGroup;
use crate::divide_round_up;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashSet, VecDeque};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum InitialSplit {
    /// The first ⌈n/2⌉ vertices in graph order go to A, the rest to B.
    #[default]
    Halves,
    /// Vertices alternate between A and B based on their position in the graph (idx % 2).
    Alternating,
    /// Vertices are shuffled with the seeded rng, then split in halves.
    Random,
    /// A is grown breadth first from the first vertex until it holds ⌈n/2⌉ vertices.
    Bfs,
}

/// Two vertex groups A and B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    a: VertexGroup,
    b: VertexGroup,
}

impl Partition {
    /// Wraps two groups. Use [`Partition::is_bisection_of`] to check them against a graph.
    pub fn new(a: VertexGroup, b: VertexGroup) -> Self {
        Self { a, b }
    }

    /// Splits the vertices of `graph` into two groups whose sizes are ⌈n/2⌉ and ⌊n/2⌋.
    pub fn initial(graph: &Graph, method: InitialSplit, rng: &mut StdRng) -> Self {
        let n = graph.vertex_count();
        let target = divide_round_up(n, 2);
        let order: Vec<VertexId> = graph.vertex_ids().collect();

        match method {
            InitialSplit::Halves => Self::halves(&order, target),
            InitialSplit::Alternating => {
                let (a, b): (Vec<_>, Vec<_>) =
                    order.iter().enumerate().partition(|(i, _)| i % 2 == 0);
                Self::new(
                    a.into_iter().map(|(_, &v)| v).collect(),
                    b.into_iter().map(|(_, &v)| v).collect(),
                )
            }
            InitialSplit::Random => {
                let mut shuffled = order;
                shuffled.shuffle(rng);
                Self::halves(&shuffled, target)
            }
            InitialSplit::Bfs => {
                let mut a = VertexGroup::new();
                let mut seen = HashSet::new();
                let mut queue = VecDeque::new();

                'grow: for &start in order.iter() {
                    if a.len() >= target {
                        break;
                    }
                    if !seen.insert(start) {
                        continue;
                    }
                    queue.clear();
                    queue.push_back(start);

                    while let Some(v) = queue.pop_front() {
                        a.add(v);
                        if a.len() >= target {
                            break 'grow;
                        }
                        for (n, _) in graph.neighbors(v) {
                            if seen.insert(n) {
                                queue.push_back(n);
                            }
                        }
                    }
                }

                let b = order.iter().copied().filter(|&v| !a.contains(v)).collect();
                log::trace!("bfs split grew {} vertices into A", a.len());
                Self::new(a, b)
            }
        }
    }

    fn halves(order: &[VertexId], target: usize) -> Self {
        let (a, b) = order.split_at(target.min(order.len()));
        Self::new(a.iter().copied().collect(), b.iter().copied().collect())
    }

    pub fn group(&self, side: Side) -> &VertexGroup {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn group_mut(&mut self, side: Side) -> &mut VertexGroup {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    pub fn a(&self) -> &VertexGroup {
        &self.a
    }

    pub fn b(&self) -> &VertexGroup {
        &self.b
    }

    pub fn side_of(&self, v: VertexId) -> Option<Side> {
        if self.a.contains(v) {
            Some(Side::A)
        } else if self.b.contains(v) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// True if both vertices are known and on the same side.
    pub fn same_side(&self, u: VertexId, v: VertexId) -> bool {
        matches!((self.side_of(u), self.side_of(v)), (Some(x), Some(y)) if x == y)
    }

    /// True if both vertices are known and on opposite sides.
    pub fn crosses(&self, u: VertexId, v: VertexId) -> bool {
        matches!((self.side_of(u), self.side_of(v)), (Some(x), Some(y)) if x != y)
    }

    /// Size difference between the two groups.
    pub fn imbalance(&self) -> usize {
        self.a.len().abs_diff(self.b.len())
    }

    /// Disjoint groups that together hold exactly the vertices of `graph`.
    pub fn is_bisection_of(&self, graph: &Graph) -> bool {
        self.a.len() + self.b.len() == graph.vertex_count()
            && graph
                .vertex_ids()
                .all(|v| self.a.contains(v) != self.b.contains(v))
    }

    /// Exchanges `va` (a member of A) with `vb` (a member of B).
    pub fn swap(&mut self, va: VertexId, vb: VertexId) -> Result<()> {
        if !self.a.contains(va) || self.a.contains(vb) || !self.b.contains(vb) || self.b.contains(va)
        {
            let err = BisectionError::InvalidSwap(format!("{va} <-> {vb}"));
            log::error!("{err}");
            return Err(err);
        }
        self.a.remove(va)?;
        self.a.add(vb);
        self.b.remove(vb)?;
        self.b.add(va);
        Ok(())
    }

    /// Relocates `v` from the group `from` to the other one.
    pub fn move_vertex(&mut self, v: VertexId, from: Side) -> Result<()> {
        let to = from.other();
        if !self.group(from).contains(v) || self.group(to).contains(v) {
            let err = BisectionError::InvalidSwap(format!("{v} out of {from:?}"));
            log::error!("{err}");
            return Err(err);
        }
        self.group_mut(from).remove(v)?;
        self.group_mut(to).add(v);
        Ok(())
    }

    pub fn into_groups(self) -> (VertexGroup, VertexGroup) {
        (self.a, self.b)
    }
}
