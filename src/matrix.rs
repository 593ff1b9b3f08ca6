//! Adjacency-matrix text loader.
//!
//! One row per line, entries `0` or `1` separated by whitespace. The first
//! row fixes the vertex count `n`; vertices are labelled `0..n`. A `1` at
//! (i, j) connects i and j with weight 1; the mirrored entry and the diagonal
//! are absorbed by the graph's duplicate and self-loop rejection.

use crate::graph::Graph;
use anyhow::{anyhow, bail, ensure, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

impl Graph {
    pub fn read_adjacency_matrix<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("could not open {}", path.display()))?;
        Self::from_adjacency_matrix(BufReader::new(file))
            .with_context(|| format!("could not parse {}", path.display()))
    }

    pub fn from_adjacency_matrix<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.context("could not read line")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
                continue;
            }

            let row = line
                .split_ascii_whitespace()
                .map(|token| match token {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    other => Err(anyhow!("line {}: expected 0 or 1, got {other:?}", line_no + 1)),
                })
                .collect::<Result<Vec<_>>>()?;

            if let Some(first) = rows.first() {
                ensure!(
                    row.len() == first.len(),
                    "line {}: expected {} entries, got {}",
                    line_no + 1,
                    first.len(),
                    row.len()
                );
            }
            rows.push(row);
        }

        let n = match rows.first() {
            Some(first) => first.len(),
            None => bail!("adjacency matrix is empty"),
        };
        ensure!(rows.len() == n, "expected {n} rows, got {}", rows.len());

        let mut graph = Graph::with_vertices((0..n).map(|i| i.to_string()))?;
        let ids: Vec<_> = graph.vertex_ids().collect();
        for (i, row) in rows.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                if bit {
                    graph.add_edge(ids[i], ids[j], 1.0);
                }
            }
        }
        log::debug!(
            "loaded adjacency matrix: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
