//! Swap log of a single search pass and the rollback to its best prefix.

use crate::error::Result;
use crate::graph::{Graph, VertexId, Weight};
use crate::partition::{Partition, Side};

/// One committed change of a search pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `a` went from A to B and `b` from B to A.
    Exchange { a: VertexId, b: VertexId },
    /// `v` went from `from` to the other side.
    Move { v: VertexId, from: Side },
}

impl Step {
    pub fn apply(self, partition: &mut Partition) -> Result<()> {
        match self {
            Step::Exchange { a, b } => partition.swap(a, b),
            Step::Move { v, from } => partition.move_vertex(v, from),
        }
    }

    pub fn undo(self, partition: &mut Partition) -> Result<()> {
        match self {
            Step::Exchange { a, b } => partition.swap(b, a),
            Step::Move { v, from } => partition.move_vertex(v, from.other()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwapRecord {
    pub step: Step,
    /// Cut cost right after the step.
    pub cut_cost: Weight,
    /// Size difference of the groups right after the step.
    pub imbalance: usize,
}

/// Summary of a pass after rollback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PassOutcome {
    /// Cut cost when the pass started.
    pub initial_cost: Weight,
    /// Cut cost after rollback, never above `initial_cost`.
    pub cut_cost: Weight,
    /// Steps the pass committed.
    pub steps_taken: usize,
    /// Steps left in place by the rollback.
    pub steps_kept: usize,
}

impl PassOutcome {
    pub fn improved(&self) -> bool {
        self.cut_cost < self.initial_cost
    }
}

#[derive(Clone, Debug)]
pub struct Trajectory {
    initial_cost: Weight,
    records: Vec<SwapRecord>,
}

impl Trajectory {
    pub fn new(initial_cost: Weight) -> Self {
        Self {
            initial_cost,
            records: Vec::new(),
        }
    }

    /// Applies `step` to `partition` and logs it with the resulting cut cost.
    pub fn commit(&mut self, step: Step, graph: &Graph, partition: &mut Partition) -> Result<Weight> {
        step.apply(partition)?;
        let cut_cost = graph.cut_cost(partition);
        let imbalance = partition.imbalance();
        log::trace!("step {}: {step:?}, cut cost: {cut_cost}", self.records.len() + 1);
        self.records.push(SwapRecord {
            step,
            cut_cost,
            imbalance,
        });
        Ok(cut_cost)
    }

    pub fn initial_cost(&self) -> Weight {
        self.initial_cost
    }

    pub fn records(&self) -> &[SwapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Length `k` of the cheapest prefix whose last record passes `accept`,
    /// and its cost. `k = 0` is the state before the pass and is always
    /// accepted; on ties the shortest prefix wins.
    pub fn best_prefix<F>(&self, accept: F) -> (usize, Weight)
    where
        F: Fn(&SwapRecord) -> bool,
    {
        let mut best = (0, self.initial_cost);
        for (i, record) in self.records.iter().enumerate() {
            if record.cut_cost < best.1 && accept(record) {
                best = (i + 1, record.cut_cost);
            }
        }
        best
    }

    /// Undoes, newest first, every step past the best accepted prefix.
    pub fn rollback<F>(self, partition: &mut Partition, accept: F) -> Result<PassOutcome>
    where
        F: Fn(&SwapRecord) -> bool,
    {
        let (keep, cut_cost) = self.best_prefix(accept);
        for record in self.records[keep..].iter().rev() {
            record.step.undo(partition)?;
        }
        Ok(PassOutcome {
            initial_cost: self.initial_cost,
            cut_cost,
            steps_taken: self.records.len(),
            steps_kept: keep,
        })
    }
}
