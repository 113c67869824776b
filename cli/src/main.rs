//! route-graph: shortest-route queries over a location edge list.
//!
//! Loads the configured data file once, then answers a single query per
//! invocation through the core `Navigator`. Output goes to stdout; logs go
//! to stderr.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod config;
mod farthest;
mod load;
mod path;
mod reachable;
mod status;
mod util;

use config::{OutputFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "route-graph", version, about = "Shortest-route queries over a weighted location graph")]
struct Cli {
    /// Config file (default: ./route-graph.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Edge-list file to load
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Annotation key holding edge weights
    #[arg(long, value_name = "KEY")]
    weight_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cheapest route between two locations
    Path {
        from: String,
        to: String,
        /// Also list the time of each leg and the total
        #[arg(short, long)]
        times: bool,
    },
    /// Location farthest from a start
    Farthest { from: String },
    /// All locations, in load order
    Locations,
    /// Locations reachable from a start, cheapest first
    Reachable {
        from: String,
        /// Leave out locations costing more than this
        #[arg(long, value_name = "COST", value_parser = util::parse_max_cost)]
        max_cost: Option<f64>,
    },
    /// Size of the loaded graph
    Status,
}

impl Cli {
    /// Command-line flags take priority over file and environment settings.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(data) = &self.data {
            settings.data_file = data.clone();
        }
        if let Some(key) = &self.weight_key {
            settings.weight_key = key.clone();
        }
        if let Some(format) = self.format {
            settings.output = format;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);
    settings.validate()?;

    util::init_logging(&settings.log_filter);
    debug!(?settings, "settings resolved");

    let loaded = load::load_graph(&settings)?;
    let format = settings.output;
    let nav = &loaded.navigator;

    let output = match &cli.command {
        Command::Path { from, to, times } => path::run(nav, from, to, *times, format)?,
        Command::Farthest { from } => farthest::run(nav, from, format)?,
        Command::Locations => status::locations(&loaded, format)?,
        Command::Reachable { from, max_cost } => reachable::run(nav, from, *max_cost, format)?,
        Command::Status => status::run(&loaded, format)?,
    };

    println!("{}", output);
    Ok(())
}
