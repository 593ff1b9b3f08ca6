//! Undirected weighted graph store
//!
//! Vertices live in an arena and are addressed by a stable [`VertexId`];
//! edges are index pairs with a weight. Every vertex keeps the list of its
//! incident edges, and a canonical `(min, max)` pair index answers
//! [`Graph::find_edge`] in O(1).
//!
//! Enumeration order is insertion order everywhere: [`Graph::vertex_ids`]
//! walks the label table, [`Graph::edges`] walks the edge arena.

use crate::error::{BisectionError, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// Edge weight type
pub type Weight = f64;

/// Stable index of a vertex inside a [`Graph`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable index of an edge inside a [`Graph`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A labelled vertex. Two vertices are equal iff their labels are.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vertex {
    label: String,
}

impl Vertex {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<&str> for Vertex {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Vertex {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex {}", self.label)
    }
}

/// An undirected edge between two distinct vertices
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub one: VertexId,
    pub two: VertexId,
    pub weight: Weight,
}

impl Edge {
    /// Returns the endpoint opposite to `v`, or `None` if `v` is not an endpoint.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.one == v {
            Some(self.two)
        } else if self.two == v {
            Some(self.one)
        } else {
            None
        }
    }

    pub fn connects(&self, u: VertexId, v: VertexId) -> bool {
        (self.one == u && self.two == v) || (self.one == v && self.two == u)
    }
}

#[derive(Clone, Debug)]
struct VertexSlot {
    vertex: Vertex,
    incident: Vec<EdgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    slots: Vec<Option<VertexSlot>>,
    /// Label table in insertion order. This is the vertex order of the graph.
    order: IndexMap<String, VertexId>,
    edges: Vec<Option<Edge>>,
    pairs: HashMap<(VertexId, VertexId), EdgeId>,
    edge_count: usize,
}

fn canonical_key(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph holding the given vertices and no edges.
    pub fn with_vertices<I, V>(vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Vertex>,
    {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v.into(), false)?;
        }
        Ok(graph)
    }

    /// Inserts a vertex.
    ///
    /// If a vertex with the same label exists and `overwrite` is false this
    /// fails with [`BisectionError::DuplicateVertex`] and leaves the graph
    /// untouched. With `overwrite` the existing vertex loses all its incident
    /// edges and is replaced in place, keeping its id and its position in the
    /// vertex order.
    pub fn add_vertex(&mut self, vertex: Vertex, overwrite: bool) -> Result<VertexId> {
        if let Some(&id) = self.order.get(vertex.label()) {
            if !overwrite {
                return Err(BisectionError::DuplicateVertex(vertex.label));
            }
            self.detach_edges(id);
            self.slots[id.0] = Some(VertexSlot {
                vertex,
                incident: Vec::new(),
            });
            return Ok(id);
        }

        let id = VertexId(self.slots.len());
        self.order.insert(vertex.label.clone(), id);
        self.slots.push(Some(VertexSlot {
            vertex,
            incident: Vec::new(),
        }));
        Ok(id)
    }

    /// Removes the vertex with the given label together with its incident edges.
    pub fn remove_vertex(&mut self, label: &str) -> Result<Vertex> {
        let id = self
            .order
            .shift_remove(label)
            .ok_or_else(|| BisectionError::VertexNotFound(label.to_string()))?;
        self.detach_edges(id);
        let slot = self.slots[id.0]
            .take()
            .ok_or_else(|| BisectionError::VertexNotFound(label.to_string()))?;
        Ok(slot.vertex)
    }

    /// Adds an edge, reporting why it was rejected.
    pub fn try_add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> Result<EdgeId> {
        if !self.contains_vertex(u) {
            return Err(BisectionError::VertexNotFound(u.to_string()));
        }
        if !self.contains_vertex(v) {
            return Err(BisectionError::VertexNotFound(v.to_string()));
        }
        if u == v {
            return Err(BisectionError::SelfLoopEdge(self.describe(u)));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(BisectionError::InvalidWeight(weight));
        }
        let key = canonical_key(u, v);
        if self.pairs.contains_key(&key) {
            return Err(BisectionError::DuplicateEdge(
                self.describe(u),
                self.describe(v),
            ));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge {
            one: u,
            two: v,
            weight,
        }));
        self.pairs.insert(key, id);
        self.edge_count += 1;
        for endpoint in [u, v] {
            if let Some(slot) = self.slots[endpoint.0].as_mut() {
                slot.incident.push(id);
            }
        }
        Ok(id)
    }

    /// Adds an edge. Self-loops, parallel edges, unknown endpoints and invalid
    /// weights are rejected with `false` and the graph is left unchanged.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> bool {
        match self.try_add_edge(u, v, weight) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("edge rejected: {err}");
                false
            }
        }
    }

    /// Removes an edge from both endpoints' adjacency and from the edge set.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<Edge> {
        let edge = self
            .edges
            .get_mut(e.0)
            .and_then(Option::take)
            .ok_or(BisectionError::EdgeNotFound(e.0))?;
        self.pairs.remove(&canonical_key(edge.one, edge.two));
        self.edge_count -= 1;
        for endpoint in [edge.one, edge.two] {
            if let Some(slot) = self.slots[endpoint.0].as_mut() {
                slot.incident.retain(|&x| x != e);
            }
        }
        Ok(edge)
    }

    fn detach_edges(&mut self, v: VertexId) {
        let incident = match self.slots[v.0].as_mut() {
            Some(slot) => std::mem::take(&mut slot.incident),
            None => return,
        };
        for e in incident {
            // The edge is listed on both endpoints, so it is always present here.
            let _ = self.remove_edge(e);
        }
    }

    /// Returns the edge between `u` and `v` in either order.
    pub fn find_edge(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        self.find_edge_id(u, v).and_then(|id| self.edge(id))
    }

    pub fn find_edge_id(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.pairs.get(&canonical_key(u, v)).copied()
    }

    /// Weight of the edge between `u` and `v`, 0 if they are not adjacent.
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Weight {
        self.find_edge(u, v).map_or(0.0, |e| e.weight)
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.0).and_then(Option::as_ref)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId(i), e)))
    }

    /// All vertex ids in graph order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.values().copied()
    }

    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.order.get(label).copied()
    }

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.slot(v).map(|s| &s.vertex)
    }

    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.vertex(v).map(Vertex::label)
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.slot(v).is_some()
    }

    /// Neighbours of `v` with the weight of the connecting edge.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.incident(v).iter().filter_map(move |e| {
            let edge = self.edges[e.0].as_ref()?;
            Some((edge.other(v)?, edge.weight))
        })
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.incident(v).len()
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn slot(&self, v: VertexId) -> Option<&VertexSlot> {
        self.slots.get(v.0).and_then(Option::as_ref)
    }

    fn incident(&self, v: VertexId) -> &[EdgeId] {
        self.slot(v).map_or(&[], |s| s.incident.as_slice())
    }

    /// Label of `v` for messages, falling back to its index.
    pub(crate) fn describe(&self, v: VertexId) -> String {
        self.label(v)
            .map_or_else(|| v.to_string(), |label| label.to_string())
    }
}
