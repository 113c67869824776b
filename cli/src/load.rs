use std::time::Instant;

use anyhow::{bail, Context, Result};
use route_graph_core::load::{load_file, LoadOptions, LoadSummary};
use route_graph_core::{Graph, Navigator};
use tracing::info;

use crate::config::Settings;

/// A loaded graph plus what it took to load it.
#[derive(Debug)]
pub struct LoadedGraph {
    pub navigator: Navigator<Graph<String>>,
    pub source: String,
    pub summary: LoadSummary,
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
}

/// Load `settings.data_file` and wrap it for querying.
///
/// Fails if the file is missing, empty or malformed, or if the graph grows
/// past `settings.max_memory_mb`.
pub fn load_graph(settings: &Settings) -> Result<LoadedGraph> {
    let start = Instant::now();
    let source = settings.data_file.display().to_string();

    let options = LoadOptions {
        weight_key: settings.weight_key.clone(),
    };
    let mut graph = Graph::new();
    let summary = load_file(&settings.data_file, &mut graph, &options)
        .with_context(|| format!("failed to load route data from {}", source))?;

    let memory_bytes = graph.memory_usage();
    let memory_mb = memory_bytes as u64 / (1024 * 1024);
    if memory_mb > settings.max_memory_mb {
        bail!(
            "loaded graph uses {}MB, exceeds max_memory_mb={}MB",
            memory_mb,
            settings.max_memory_mb
        );
    }

    let node_count = graph.node_count();
    let edge_count = graph.edge_count();
    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(nodes = node_count, edges = edge_count, load_time_ms, "graph ready");

    Ok(LoadedGraph {
        navigator: Navigator::new(graph),
        source,
        summary,
        node_count,
        edge_count,
        memory_bytes,
        load_time_ms,
    })
}
