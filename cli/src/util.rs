use anyhow::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over the
/// configured filter.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("route_graph=info"));

    // try_init so a second call (tests) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Pretty-printed JSON for command output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Leg weights rounded to whole seconds, as they are displayed.
pub fn whole_seconds(legs: &[f64]) -> Vec<i64> {
    legs.iter().map(|t| t.round() as i64).collect()
}

/// Total of the displayed (rounded) leg seconds, in minutes to two decimals.
pub fn total_minutes(legs: &[f64]) -> f64 {
    let seconds: i64 = whole_seconds(legs).iter().sum();
    (seconds as f64 / 60.0 * 100.0).round() / 100.0
}

/// Parse a non-negative cost bound from the command line.
pub fn parse_max_cost(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("max cost must be a finite, non-negative number, got {}", s));
    }
    Ok(value)
}
