use crate::error::Result;
use crate::graph::{Graph, Weight};
use crate::group::VertexGroup;
use crate::moves::BalancePolicy;
use crate::partition::{InitialSplit, Partition};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SearchStrategy {
    /// Kernighan-Lin: swap one vertex of each side per step. Needs an even vertex count.
    #[default]
    Exchange,
    /// Fiduccia-Mattheyses: move one vertex per step under the given balance policy.
    Move(BalancePolicy),
}

#[derive(Clone, Debug)]
pub struct BisectionConfig {
    /// The seed for the random number generator.
    pub rng_seed: u64,
    /// What initial split to use.
    pub initial_split: InitialSplit,
    /// The local search run on the initial split.
    pub strategy: SearchStrategy,
    /// The maximum amount of passes. Passes are repeated only while they improve the cut.
    pub max_passes: u32,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            rng_seed: 1234,
            initial_split: InitialSplit::Halves,
            strategy: SearchStrategy::Exchange,
            max_passes: 1,
        }
    }
}

/// Result of [`Graph::partition_bisection`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bisection {
    group_a: VertexGroup,
    group_b: VertexGroup,
    cut_cost: Weight,
    passes: u32,
}

impl Bisection {
    pub fn group_a(&self) -> &VertexGroup {
        &self.group_a
    }

    pub fn group_b(&self) -> &VertexGroup {
        &self.group_b
    }

    pub fn cut_cost(&self) -> Weight {
        self.cut_cost
    }

    /// Number of search passes that were run.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn labels_a<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.group_a.labels(graph)
    }

    pub fn labels_b<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.group_b.labels(graph)
    }

    pub fn into_groups(self) -> (VertexGroup, VertexGroup) {
        (self.group_a, self.group_b)
    }
}

impl Graph {
    /// Splits the graph into two parts while minimizing the edge cut cost.
    ///
    /// The graph is only read; the groups are built and refined on a
    /// partition owned by this call.
    pub fn partition_bisection(&self, config: &BisectionConfig) -> Result<Bisection> {
        if self.is_empty() {
            return Ok(Bisection {
                group_a: VertexGroup::new(),
                group_b: VertexGroup::new(),
                cut_cost: 0.0,
                passes: 0,
            });
        }

        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let mut partition = Partition::initial(self, config.initial_split, &mut rng);
        let mut cut_cost = self.cut_cost(&partition);
        log::trace!("initial cut cost: {cut_cost}");

        let mut passes = 0;
        for pass in 0..config.max_passes.max(1) {
            let outcome = match config.strategy {
                SearchStrategy::Exchange => self.exchange_pass(&mut partition)?,
                SearchStrategy::Move(policy) => self.move_pass(&mut partition, policy)?,
            };
            passes += 1;
            cut_cost = outcome.cut_cost;
            log::trace!("pass: {pass}, cut cost: {cut_cost}");

            if !outcome.improved() {
                break;
            }
        }

        log::debug!(
            "bisection of {} vertices: |A| = {}, |B| = {}, cut cost {cut_cost} after {passes} passes",
            self.vertex_count(),
            partition.a().len(),
            partition.b().len()
        );
        let (group_a, group_b) = partition.into_groups();
        Ok(Bisection {
            group_a,
            group_b,
            cut_cost,
            passes,
        })
    }
}

/// Bisects `graph` with the default configuration: halves split, one exchange pass.
pub fn process(graph: &Graph) -> Result<Bisection> {
    graph.partition_bisection(&BisectionConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BisectionError;

    /// Two dense clusters {0..4} and {4..8} joined by a single light edge,
    /// with the initial halves split interleaving them.
    fn two_clusters() -> Graph {
        let labels = ["0", "4", "1", "5", "2", "6", "3", "7"];
        let mut graph = Graph::with_vertices(labels).unwrap();
        let id = |g: &Graph, i: usize| g.vertex_id(&i.to_string()).unwrap();
        for cluster in [0..4, 4..8] {
            let members: Vec<usize> = cluster.collect();
            for (i, &u) in members.iter().enumerate() {
                for &v in &members[i + 1..] {
                    let (u, v) = (id(&graph, u), id(&graph, v));
                    assert!(graph.add_edge(u, v, 3.0));
                }
            }
        }
        let (u, v) = (id(&graph, 3), id(&graph, 4));
        assert!(graph.add_edge(u, v, 1.0));
        graph
    }

    #[test]
    fn empty_graph_gives_empty_groups() {
        let result = process(&Graph::new()).unwrap();
        assert!(result.group_a().is_empty());
        assert!(result.group_b().is_empty());
        assert_eq!(result.cut_cost(), 0.0);
        assert_eq!(result.passes(), 0);
    }

    #[test]
    fn default_run_is_one_exchange_pass() {
        let graph = two_clusters();
        let result = process(&graph).unwrap();
        assert_eq!(result.passes(), 1);
        assert_eq!(result.group_a().len(), 4);
        assert_eq!(result.group_b().len(), 4);
        assert_eq!(result.cut_cost(), 1.0);

        let partition = Partition::new(result.group_a().clone(), result.group_b().clone());
        assert_eq!(graph.cut_cost(&partition), result.cut_cost());
    }

    #[test]
    fn repeated_passes_stop_once_nothing_improves() {
        let graph = two_clusters();
        let config = BisectionConfig {
            max_passes: 10,
            ..Default::default()
        };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.cut_cost(), 1.0);
        assert_eq!(result.passes(), 2);

        let mut a = result.labels_a(&graph);
        a.sort_unstable();
        assert!(a == ["0", "1", "2", "3"] || a == ["4", "5", "6", "7"]);
    }

    #[test]
    fn move_strategy_handles_odd_graphs() {
        let mut graph = two_clusters();
        graph.add_vertex("8".into(), false).unwrap();

        assert_eq!(
            process(&graph),
            Err(BisectionError::UnevenVertexCount(9))
        );

        let config = BisectionConfig {
            strategy: SearchStrategy::Move(BalancePolicy::default()),
            max_passes: 10,
            ..Default::default()
        };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.group_a().len(), 4);
        assert_eq!(result.group_b().len(), 5);
        assert_eq!(result.cut_cost(), 1.0);
    }

    #[test]
    fn seeded_random_split_is_reproducible() {
        let graph = two_clusters();
        let config = BisectionConfig {
            initial_split: InitialSplit::Random,
            rng_seed: 99,
            ..Default::default()
        };
        let first = graph.partition_bisection(&config).unwrap();
        let second = graph.partition_bisection(&config).unwrap();
        assert_eq!(first, second);
    }
}
