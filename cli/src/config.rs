use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use route_graph_core::load::DEFAULT_WEIGHT_KEY;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "route-graph.toml";

pub const ENV_DATA: &str = "ROUTE_GRAPH_DATA";
pub const ENV_WEIGHT_KEY: &str = "ROUTE_GRAPH_WEIGHT_KEY";
pub const ENV_MAX_MEMORY_MB: &str = "ROUTE_GRAPH_MAX_MEMORY_MB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Runtime settings. Sources, lowest priority first: defaults, config
/// file, environment, command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge-list file to load at startup.
    pub data_file: PathBuf,
    /// Annotation key holding each edge's weight.
    pub weight_key: String,
    /// The loaded graph must stay under this size.
    pub max_memory_mb: u64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("campus.dot"),
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
            max_memory_mb: 4096,
            log_filter: "route_graph=info".to_string(),
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Load from `path` if given (it must exist), else from
    /// `route-graph.toml` if present, then apply environment overrides.
    /// Callers validate once command-line flags are applied too.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `ROUTE_GRAPH_*` overrides read through `var`.
    pub fn apply_env_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data) = var(ENV_DATA) {
            self.data_file = PathBuf::from(data);
        }
        if let Some(key) = var(ENV_WEIGHT_KEY) {
            self.weight_key = key;
        }
        if let Some(mb) = var(ENV_MAX_MEMORY_MB) {
            self.max_memory_mb = mb
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: '{}'", ENV_MAX_MEMORY_MB, mb))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.weight_key.trim().is_empty() {
            bail!("weight_key must not be empty");
        }
        if self.max_memory_mb == 0 {
            bail!("max_memory_mb must be greater than 0");
        }
        Ok(())
    }
}
