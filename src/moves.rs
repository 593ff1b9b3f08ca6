//! Fiduccia-Mattheyses move pass.

use crate::error::Result;
use crate::graph::{Graph, VertexId, Weight};
use crate::group::VertexGroup;
use crate::partition::{Partition, Side};
use crate::trajectory::{PassOutcome, Step, Trajectory};

/// Which single-vertex moves the move pass may make, and which of the
/// resulting partitions the rollback may settle on.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum BalancePolicy {
    /// Any unlocked vertex may move, even if that empties a side.
    Free,
    /// A side is never emptied: a side down to its last vertex only receives.
    NonEmpty,
    /// A move is allowed if the size difference afterwards is at most the given
    /// tolerance, or smaller than before the move. The rollback may keep any
    /// of the visited partitions.
    ///
    /// From an even, balanced split every move leaves the sides two apart, so
    /// a tolerance below 2 makes no move there.
    Within(usize),
    /// Moves as `Within(2)`, but the rollback only keeps partitions whose
    /// sizes differ by at most one (or the partition the pass started from).
    #[default]
    Balanced,
}

impl BalancePolicy {
    /// Whether a vertex may leave a group of `from_len` vertices for one of `to_len`.
    pub fn allows(self, from_len: usize, to_len: usize) -> bool {
        match self {
            BalancePolicy::Free => from_len > 0,
            BalancePolicy::NonEmpty => from_len > 1,
            BalancePolicy::Balanced => BalancePolicy::Within(2).allows(from_len, to_len),
            BalancePolicy::Within(tolerance) => {
                if from_len == 0 {
                    return false;
                }
                let before = from_len.abs_diff(to_len);
                let after = (from_len - 1).abs_diff(to_len + 1);
                after <= tolerance || after < before
            }
        }
    }

    /// Whether the rollback may stop at a partition whose sizes differ by `imbalance`.
    pub fn accepts(self, imbalance: usize) -> bool {
        match self {
            BalancePolicy::Balanced => imbalance <= 1,
            _ => true,
        }
    }
}

impl Graph {
    /// Runs one Fiduccia-Mattheyses pass over `partition`.
    ///
    /// Every vertex starts unlocked. Each step moves the unlocked vertex with
    /// the largest [`vertex_gain`](Graph::vertex_gain) that `policy` allows to
    /// the other side and locks it. The pass stops after |V| steps or when no
    /// allowed move is left, then rolls back to the cheapest prefix of moves
    /// that `policy` accepts (the unchanged partition included).
    ///
    /// Works for any vertex count.
    pub fn move_pass(&self, partition: &mut Partition, policy: BalancePolicy) -> Result<PassOutcome> {
        let mut unlocked: VertexGroup = self
            .vertex_ids()
            .filter(|&v| partition.side_of(v).is_some())
            .collect();
        let mut trajectory = Trajectory::new(self.cut_cost(partition));

        for _ in 0..self.vertex_count() {
            let Some((v, from, gain)) = self.best_move(partition, &unlocked, policy) else {
                break;
            };
            log::trace!("moving {} out of {from:?} (gain {gain})", self.describe(v));
            trajectory.commit(Step::Move { v, from }, self, partition)?;
            unlocked.remove(v)?;
        }

        let outcome = trajectory.rollback(partition, |record| policy.accepts(record.imbalance))?;
        log::debug!(
            "move pass ({policy:?}): cut cost {} -> {}, kept {} of {} moves",
            outcome.initial_cost,
            outcome.cut_cost,
            outcome.steps_kept,
            outcome.steps_taken
        );
        Ok(outcome)
    }

    /// The allowed move with the largest gain; ties go to the earliest unlocked vertex.
    fn best_move(
        &self,
        partition: &Partition,
        unlocked: &VertexGroup,
        policy: BalancePolicy,
    ) -> Option<(VertexId, Side, Weight)> {
        let mut best: Option<(VertexId, Side, Weight)> = None;
        for v in unlocked.iter() {
            let Some(from) = partition.side_of(v) else {
                continue;
            };
            let from_len = partition.group(from).len();
            let to_len = partition.group(from.other()).len();
            if !policy.allows(from_len, to_len) {
                continue;
            }
            let gain = self.vertex_gain(v, partition);
            if best.map_or(true, |(_, _, max)| gain > max) {
                best = Some((v, from, gain));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(labels: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
        let mut graph = Graph::with_vertices(labels.iter().copied()).unwrap();
        for &(u, v, w) in edges {
            let (u, v) = (graph.vertex_id(u).unwrap(), graph.vertex_id(v).unwrap());
            assert!(graph.add_edge(u, v, w));
        }
        graph
    }

    fn split(graph: &Graph, a: &[&str], b: &[&str]) -> Partition {
        let ids = |labels: &[&str]| -> VertexGroup {
            labels.iter().map(|l| graph.vertex_id(l).unwrap()).collect()
        };
        Partition::new(ids(a), ids(b))
    }

    fn sorted<'g>(graph: &'g Graph, group: &VertexGroup) -> Vec<&'g str> {
        let mut labels = group.labels(graph);
        labels.sort_unstable();
        labels
    }

    #[test]
    fn within_policy_alternates_sides() {
        let policy = BalancePolicy::Within(2);
        assert!(policy.allows(2, 2));
        assert!(!policy.allows(1, 3));
        assert!(policy.allows(3, 1));
        // An odd count keeps a difference of one.
        assert!(policy.allows(2, 1));
        assert!(!policy.allows(1, 2));
        // Badly unbalanced groups may always move towards balance.
        assert!(policy.allows(6, 0));
    }

    #[test]
    fn balanced_policy_moves_like_within_two() {
        for (from, to) in [(2, 2), (1, 3), (3, 1), (2, 1), (1, 2), (6, 0), (0, 4)] {
            assert_eq!(
                BalancePolicy::Balanced.allows(from, to),
                BalancePolicy::Within(2).allows(from, to)
            );
        }
        assert!(BalancePolicy::Balanced.accepts(1));
        assert!(!BalancePolicy::Balanced.accepts(2));
        assert!(BalancePolicy::Within(2).accepts(2));
        assert_eq!(BalancePolicy::default(), BalancePolicy::Balanced);
    }

    #[test]
    fn non_empty_policy_keeps_the_last_vertex() {
        assert!(!BalancePolicy::NonEmpty.allows(1, 5));
        assert!(BalancePolicy::NonEmpty.allows(2, 0));
        assert!(BalancePolicy::Free.allows(1, 5));
    }

    #[test]
    fn move_pass_finds_the_cheap_cut() {
        let graph = graph_with(
            &["1", "2", "3", "4"],
            &[("1", "2", 1.0), ("3", "4", 1.0), ("1", "4", 5.0), ("2", "3", 5.0)],
        );
        let mut p = split(&graph, &["1", "2"], &["3", "4"]);

        let outcome = graph.move_pass(&mut p, BalancePolicy::default()).unwrap();
        assert_eq!(outcome.initial_cost, 10.0);
        assert_eq!(outcome.cut_cost, 2.0);
        assert_eq!(outcome.steps_taken, 4);
        assert_eq!(outcome.steps_kept, 2);
        assert_eq!(sorted(&graph, p.a()), ["2", "3"]);
        assert_eq!(sorted(&graph, p.b()), ["1", "4"]);
    }

    #[test]
    fn move_pass_keeps_an_optimal_split() {
        let graph = graph_with(
            &["1", "2", "3", "4"],
            &[("1", "2", 10.0), ("3", "4", 10.0), ("1", "3", 1.0), ("2", "4", 1.0)],
        );
        let mut p = split(&graph, &["1", "2"], &["3", "4"]);
        let before = p.clone();

        let outcome = graph.move_pass(&mut p, BalancePolicy::default()).unwrap();
        assert_eq!(outcome.cut_cost, 2.0);
        assert_eq!(outcome.steps_kept, 0);
        assert_eq!(p, before);
    }

    #[test]
    fn balanced_policy_settles_on_an_even_split() {
        // Vertex 1 carries all the weight: moving it alone empties the cut but
        // leaves the sides three to one.
        let graph = graph_with(&["1", "2", "3", "4"], &[("1", "3", 5.0), ("1", "4", 5.0)]);

        let mut p = split(&graph, &["1", "2"], &["3", "4"]);
        let outcome = graph.move_pass(&mut p, BalancePolicy::Within(2)).unwrap();
        assert_eq!(outcome.cut_cost, 0.0);
        assert_eq!(p.imbalance(), 2);

        let mut p = split(&graph, &["1", "2"], &["3", "4"]);
        let outcome = graph.move_pass(&mut p, BalancePolicy::Balanced).unwrap();
        assert_eq!(outcome.initial_cost, 10.0);
        assert_eq!(outcome.cut_cost, 5.0);
        assert_eq!(outcome.steps_taken, 4);
        assert_eq!(outcome.steps_kept, 2);
        assert_eq!(p.imbalance(), 0);
        assert_eq!(graph.cut_cost(&p), 5.0);
        assert_eq!(sorted(&graph, p.a()), ["2", "3"]);
        assert_eq!(sorted(&graph, p.b()), ["1", "4"]);
    }

    #[test]
    fn free_policy_may_empty_a_side() {
        let graph = graph_with(&["x", "y"], &[("x", "y", 1.0)]);

        let mut p = split(&graph, &["x"], &["y"]);
        let outcome = graph.move_pass(&mut p, BalancePolicy::Free).unwrap();
        assert_eq!(outcome.cut_cost, 0.0);
        assert!(p.a().is_empty());

        let mut p = split(&graph, &["x"], &["y"]);
        let outcome = graph.move_pass(&mut p, BalancePolicy::NonEmpty).unwrap();
        assert_eq!(outcome.steps_taken, 0);
        assert_eq!(outcome.cut_cost, 1.0);
    }

    #[test]
    fn odd_vertex_count_is_fine() {
        let graph = graph_with(
            &["a", "b", "c", "d", "e"],
            &[("a", "d", 3.0), ("b", "e", 3.0), ("a", "b", 1.0), ("c", "d", 1.0)],
        );
        let mut p = split(&graph, &["a", "b", "c"], &["d", "e"]);
        let initial = graph.cut_cost(&p);

        let outcome = graph.move_pass(&mut p, BalancePolicy::default()).unwrap();
        assert!(outcome.cut_cost <= initial);
        assert_eq!(graph.cut_cost(&p), outcome.cut_cost);
        assert!(p.is_bisection_of(&graph));
        assert!(p.imbalance() <= 1);
    }
}
