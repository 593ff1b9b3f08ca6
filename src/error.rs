//! Error types for graph construction and bisection

use thiserror::Error;

/// Result type for bisection operations
pub type Result<T> = std::result::Result<T, BisectionError>;

/// Errors raised by the graph store, the vertex groups and the search passes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BisectionError {
    /// The exchange pass pairs vertices and needs an even vertex count
    #[error("Exchange pass requires an even vertex count, got {0}")]
    UnevenVertexCount(usize),

    /// A vertex with this label already exists
    #[error("Duplicate vertex: {0}")]
    DuplicateVertex(String),

    /// The two vertices are already connected
    #[error("Edge already exists: ({0}, {1})")]
    DuplicateEdge(String, String),

    /// Both endpoints are the same vertex
    #[error("Self-loop on vertex {0}")]
    SelfLoopEdge(String),

    /// Edge weight is negative, NaN or infinite
    #[error("Invalid edge weight: {0}")]
    InvalidWeight(f64),

    /// No vertex with this label (or id) exists
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// No such edge in the graph
    #[error("Edge not found: {0}")]
    EdgeNotFound(usize),

    /// The vertex is not a member of the group it is removed from
    #[error("Vertex {0} is not present in the group")]
    VertexNotPresent(usize),

    /// A swap or move contradicts the current group membership
    #[error("Invalid swap: {0}")]
    InvalidSwap(String),
}
