//! Kernighan-Lin exchange pass.

use crate::error::{BisectionError, Result};
use crate::graph::{Graph, VertexId, Weight};
use crate::group::VertexGroup;
use crate::partition::Partition;
use crate::trajectory::{PassOutcome, Step, Trajectory};

impl Graph {
    /// Runs one Kernighan-Lin pass over `partition`.
    ///
    /// Up to |V|/2 times the pair (a from A, b from B) with the largest
    /// [`pair_gain`](Graph::pair_gain) among the not yet swapped vertices is
    /// exchanged, even when the gain is negative. Afterwards every swap past
    /// the cheapest prefix of the sequence is undone, so the returned cut cost
    /// is never above the one the pass started with.
    ///
    /// Fails with [`BisectionError::UnevenVertexCount`] before touching the
    /// partition if the graph has an odd number of vertices.
    pub fn exchange_pass(&self, partition: &mut Partition) -> Result<PassOutcome> {
        let n = self.vertex_count();
        if n % 2 != 0 {
            return Err(BisectionError::UnevenVertexCount(n));
        }

        let mut unswapped_a = partition.a().snapshot();
        let mut unswapped_b = partition.b().snapshot();
        let mut trajectory = Trajectory::new(self.cut_cost(partition));

        for _ in 0..n / 2 {
            let Some((a, b, gain)) = self.best_pair(partition, &unswapped_a, &unswapped_b) else {
                break;
            };
            log::trace!(
                "swapping {} <-> {} (gain {gain})",
                self.describe(a),
                self.describe(b)
            );
            trajectory.commit(Step::Exchange { a, b }, self, partition)?;
            unswapped_a.remove(a)?;
            unswapped_b.remove(b)?;
        }

        // Swaps keep the group sizes, so every prefix is as balanced as the start.
        let outcome = trajectory.rollback(partition, |_| true)?;
        log::debug!(
            "exchange pass: cut cost {} -> {}, kept {} of {} swaps",
            outcome.initial_cost,
            outcome.cut_cost,
            outcome.steps_kept,
            outcome.steps_taken
        );
        Ok(outcome)
    }

    /// The pair with the largest swap gain; ties go to the first pair in
    /// (`unswapped_a` x `unswapped_b`) order.
    fn best_pair(
        &self,
        partition: &Partition,
        unswapped_a: &VertexGroup,
        unswapped_b: &VertexGroup,
    ) -> Option<(VertexId, VertexId, Weight)> {
        // Gains only depend on the current partition, so B's are computed once per step.
        let gains_b: Vec<(VertexId, Weight)> = unswapped_b
            .iter()
            .map(|b| (b, self.vertex_gain(b, partition)))
            .collect();

        let mut best: Option<(VertexId, VertexId, Weight)> = None;
        for a in unswapped_a.iter() {
            let gain_a = self.vertex_gain(a, partition);
            for &(b, gain_b) in gains_b.iter() {
                let gain = gain_a + gain_b - 2.0 * self.edge_weight(a, b);
                if best.map_or(true, |(_, _, max)| gain > max) {
                    best = Some((a, b, gain));
                }
            }
        }
        best
    }
}
