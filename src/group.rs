use crate::error::{BisectionError, Result};
use crate::graph::{Graph, VertexId};
use indexmap::IndexSet;

/// One side of a partition: an insertion-ordered, duplicate-free set of vertices.
///
/// Removal keeps the relative order of the remaining members, so iteration
/// (and with it every tie-break in the search passes) is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexGroup {
    members: IndexSet<VertexId>,
}

impl VertexGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.members.contains(&v)
    }

    /// Appends `v`. Returns false if it was already a member.
    pub fn add(&mut self, v: VertexId) -> bool {
        self.members.insert(v)
    }

    pub fn remove(&mut self, v: VertexId) -> Result<()> {
        if self.members.shift_remove(&v) {
            Ok(())
        } else {
            Err(BisectionError::VertexNotPresent(v.index()))
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.members.iter().copied()
    }

    /// Independent copy with the same members in the same order.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Labels of the members in group order. Ids unknown to `graph` are skipped.
    pub fn labels<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.iter().filter_map(|v| graph.label(v)).collect()
    }
}

impl FromIterator<VertexId> for VertexGroup {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VertexGroup {
    type Item = VertexId;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, VertexId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}
