use std::fmt::Write;

use anyhow::Result;
use route_graph_core::{Navigator, PathGraph};

use crate::config::OutputFormat;
use crate::util::to_json;

/// `reachable FROM [--max-cost N]`: every location reachable from `from`,
/// cheapest first.
pub fn run<G>(nav: &Navigator<G>, from: &str, max_cost: Option<f64>, format: OutputFormat) -> Result<String>
where
    G: PathGraph<Label = String>,
{
    let reached = nav.reachable(&from.to_string(), max_cost)?;
    match format {
        OutputFormat::Json => to_json(&reached),
        OutputFormat::Text => {
            let mut out = format!("{:>10} {:>6}  {}", "cost", "hops", "location");
            let _ = write!(out, "\n{:->10} {:->6}  {:-<8}", "", "", "");
            for r in &reached {
                let _ = write!(out, "\n{:>10.1} {:>6}  {}", r.cost, r.hops, r.label);
            }
            let _ = write!(out, "\n{} reachable from {}", reached.len(), from);
            Ok(out)
        }
    }
}
