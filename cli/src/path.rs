use std::fmt::Write;

use anyhow::Result;
use route_graph_core::{Navigator, PathGraph};
use serde_json::json;

use crate::config::OutputFormat;
use crate::util::{to_json, total_minutes, whole_seconds};

/// `path FROM TO [--times]`: the stops on the cheapest route, optionally
/// with the time of each leg and the total.
pub fn run<G>(nav: &Navigator<G>, from: &str, to: &str, with_times: bool, format: OutputFormat) -> Result<String>
where
    G: PathGraph<Label = String>,
{
    let (from, to) = (from.to_string(), to.to_string());

    if !with_times {
        let stops = nav.find_shortest_path(&from, &to)?;
        return match format {
            OutputFormat::Text => Ok(render_stops(&stops)),
            OutputFormat::Json => to_json(&json!({ "stops": stops })),
        };
    }

    let route = nav.route(&from, &to)?;
    match format {
        OutputFormat::Text => {
            let mut out = render_stops(&route.stops);
            out.push_str("\n\n");
            out.push_str(&render_legs(&route.stops, &route.legs));
            Ok(out)
        }
        OutputFormat::Json => to_json(&json!({
            "stops": route.stops,
            "legs": route.legs,
            "total": route.total,
            "total_minutes": total_minutes(&route.legs),
        })),
    }
}

fn render_stops(stops: &[String]) -> String {
    let mut out = String::from("Results List:");
    for stop in stops {
        let _ = write!(out, "\n\t{}", stop);
    }
    out
}

/// Stops interleaved with their leg times in whole seconds, then the total
/// in minutes.
fn render_legs(stops: &[String], legs: &[f64]) -> String {
    let mut out = String::from("Results List (with walking times):");
    let seconds = whole_seconds(legs);
    if let Some((first, rest)) = stops.split_first() {
        let _ = write!(out, "\n\t{}", first);
        for (stop, secs) in rest.iter().zip(&seconds) {
            let _ = write!(out, "\n\t-({}sec)->{}", secs, stop);
        }
    }
    let _ = write!(out, "\n\tTotal time: {} min", total_minutes(legs));
    out
}
