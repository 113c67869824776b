use anyhow::Result;
use route_graph_core::{Navigator, PathGraph};
use serde_json::json;

use crate::config::OutputFormat;
use crate::util::to_json;

/// `farthest FROM`: the location whose cheapest route from `from` costs the
/// most.
pub fn run<G>(nav: &Navigator<G>, from: &str, format: OutputFormat) -> Result<String>
where
    G: PathGraph<Label = String>,
{
    let from = from.to_string();
    let farthest = nav.most_distant_location(&from)?;
    match format {
        OutputFormat::Text => Ok(format!("Most Distant Location: {}", farthest)),
        OutputFormat::Json => to_json(&json!({ "from": from, "most_distant": farthest })),
    }
}
