use crate::graph::{Graph, VertexId, Weight};
use crate::partition::{Partition, Side};

impl Graph {
    /// Returns the summed weight of edges from `v` to neighbours on `side`.
    pub fn weight_towards(&self, v: VertexId, partition: &Partition, side: Side) -> Weight {
        let group = partition.group(side);
        self.neighbors(v)
            .filter(|&(n, _)| group.contains(n))
            .fold(0.0, |acc, (_, w)| acc + w)
    }

    /// Weight of the cut edges incident to `v`.
    pub fn external_weight(&self, v: VertexId, partition: &Partition) -> Weight {
        match partition.side_of(v) {
            Some(side) => self.weight_towards(v, partition, side.other()),
            None => 0.0,
        }
    }

    /// Change in cut cost if `v` alone moved to the other group: the weight of
    /// its cut edges minus the weight of its uncut edges.
    ///
    /// Non-adjacent vertices contribute nothing, so only the adjacency of `v`
    /// is walked.
    pub fn vertex_gain(&self, v: VertexId, partition: &Partition) -> Weight {
        let Some(side) = partition.side_of(v) else {
            return 0.0;
        };
        let own = partition.group(side);
        self.neighbors(v)
            .fold(0.0, |acc, (n, w)| if own.contains(n) { acc - w } else { acc + w })
    }

    /// Change in cut cost if `a` and `b`, sitting on opposite sides, traded places.
    ///
    /// The edge between them stays cut either way, so it is removed from both gains.
    pub fn pair_gain(&self, a: VertexId, b: VertexId, partition: &Partition) -> Weight {
        self.vertex_gain(a, partition) + self.vertex_gain(b, partition)
            - 2.0 * self.edge_weight(a, b)
    }

    /// Sum of the weights of the edges crossing the partition. Edges touching
    /// a vertex outside both groups are not counted.
    pub fn cut_cost(&self, partition: &Partition) -> Weight {
        self.edges()
            .filter(|(_, e)| partition.crosses(e.one, e.two))
            .fold(0.0, |acc, (_, e)| acc + e.weight)
    }

    /// The cut cost reconstructed from one side: every cut edge has exactly one
    /// endpoint in `side`, so the external weights of its members add up to the cut.
    pub fn cut_cost_from_side(&self, partition: &Partition, side: Side) -> Weight {
        partition
            .group(side)
            .iter()
            .fold(0.0, |acc, v| acc + self.external_weight(v, partition))
    }
}
