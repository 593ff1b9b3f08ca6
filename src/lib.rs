// Graph bisection by local search: Kernighan-Lin exchange passes and
// Fiduccia-Mattheyses move passes, both rolled back to their cheapest prefix.
// https://doi.org/10.1002/j.1538-7305.1970.tb01770.x

pub mod cost;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod graph;
pub mod group;
pub mod matrix;
pub mod moves;
pub mod partition;
pub mod trajectory;

pub use engine::{process, Bisection, BisectionConfig, SearchStrategy};
pub use error::{BisectionError, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId, Weight};
pub use group::VertexGroup;
pub use moves::BalancePolicy;
pub use partition::{InitialSplit, Partition, Side};
pub use trajectory::{PassOutcome, Step, SwapRecord, Trajectory};

pub(crate) fn divide_round_up(dividend: usize, divisor: usize) -> usize {
    (dividend + divisor - 1) / divisor
}
