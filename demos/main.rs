use anyhow::{Context, Result};
use bisect_kl::{BalancePolicy, BisectionConfig, Graph, SearchStrategy};
use std::time;

fn main() -> Result<()> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/graph.txt".to_string());
    let graph = Graph::read_adjacency_matrix(&path)?;
    println!(
        "graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let runs = [
        ("Kernighan Lin Algorithm", SearchStrategy::Exchange),
        (
            "Fiduccia Mattheyses Algorithm",
            SearchStrategy::Move(BalancePolicy::default()),
        ),
    ];
    for (name, strategy) in runs {
        let t1 = time::Instant::now();
        let result = graph
            .partition_bisection(&BisectionConfig {
                strategy,
                ..Default::default()
            })
            .with_context(|| format!("{name} failed"))?;

        println!("{name}");
        println!("Cluster 1");
        println!("{:?}", result.labels_a(&graph));
        println!("Cluster 2");
        println!("{:?}", result.labels_b(&graph));
        println!(
            "cut cost: {}, time: {}ms",
            result.cut_cost(),
            t1.elapsed().as_millis()
        );
    }
    Ok(())
}
