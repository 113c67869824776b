use anyhow::Result;
use serde_json::json;

use crate::config::OutputFormat;
use crate::load::LoadedGraph;
use crate::util::to_json;

/// `status`: size of the loaded graph and what the load did.
pub fn run(loaded: &LoadedGraph, format: OutputFormat) -> Result<String> {
    let s = &loaded.summary;
    match format {
        OutputFormat::Json => to_json(&json!({
            "source": loaded.source,
            "node_count": loaded.node_count,
            "edge_count": loaded.edge_count,
            "memory_bytes": loaded.memory_bytes,
            "load_time_ms": loaded.load_time_ms,
            "lines_read": s.lines_read,
            "duplicates_skipped": s.duplicates_skipped,
            "lines_ignored": s.lines_ignored,
        })),
        OutputFormat::Text => Ok(format!(
            "source:             {}\n\
             nodes:              {}\n\
             edges:              {}\n\
             memory:             ~{:.1}KB\n\
             load time:          {:.1}ms\n\
             lines read:         {}\n\
             duplicates skipped: {}\n\
             lines ignored:      {}",
            loaded.source,
            loaded.node_count,
            loaded.edge_count,
            loaded.memory_bytes as f64 / 1024.0,
            loaded.load_time_ms,
            s.lines_read,
            s.duplicates_skipped,
            s.lines_ignored,
        )),
    }
}

/// `locations`: every location in load order.
pub fn locations(loaded: &LoadedGraph, format: OutputFormat) -> Result<String> {
    let all = loaded.navigator.locations();
    match format {
        OutputFormat::Text => Ok(all.join("\n")),
        OutputFormat::Json => to_json(&all),
    }
}
