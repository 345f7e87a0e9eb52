//! Configuration system for the `TaskDeck` demo driver.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;
use std::time::Duration;

use crate::log::DEFAULT_LOG_CAPACITY;

/// Errors that can occur when loading demo configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure for the demo driver.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DemoConfigFile {
    sim: SimFileConfig,
    log: LogFileConfig,
    display: DisplayFileConfig,
}

/// `[sim]` section of the demo config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SimFileConfig {
    events: Option<u32>,
    tick_ms: Option<u64>,
    seed: Option<u64>,
}

/// `[log]` section of the demo config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LogFileConfig {
    capacity: Option<usize>,
}

/// `[display]` section of the demo config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DisplayFileConfig {
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the demo driver.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "TaskDeck board demo")]
pub struct DemoCliArgs {
    /// Number of synthetic peer events to run.
    #[arg(short, long)]
    pub events: Option<u32>,

    /// Milliseconds between peer events.
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Seed for the random peer (default: derived from the clock).
    #[arg(short, long, env = "TASKDECK_SEED")]
    pub seed: Option<u64>,

    /// Replay the fixed demo script instead of random peer traffic.
    #[arg(long)]
    pub scripted: bool,

    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of activity feed entries to retain.
    #[arg(long)]
    pub log_capacity: Option<usize>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved demo driver configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of synthetic peer events to run.
    pub events: u32,
    /// Delay between peer events.
    pub tick: Duration,
    /// Random peer seed; `None` means derive one from the clock.
    pub seed: Option<u64>,
    /// Replay the fixed demo script instead of random traffic.
    pub scripted: bool,
    /// Maximum number of activity feed entries to retain.
    pub log_capacity: usize,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            events: 12,
            tick: Duration::from_millis(250),
            seed: None,
            scripted: false,
            log_capacity: DEFAULT_LOG_CAPACITY,
            timestamp_format: "%H:%M:%S".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &DemoCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `DemoConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &DemoCliArgs, file: &DemoConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            events: cli.events.or(file.sim.events).unwrap_or(defaults.events),
            tick: cli
                .tick_ms
                .or(file.sim.tick_ms)
                .map_or(defaults.tick, Duration::from_millis),
            seed: cli.seed.or(file.sim.seed),
            scripted: cli.scripted,
            log_capacity: cli
                .log_capacity
                .or(file.log.capacity)
                .unwrap_or(defaults.log_capacity),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.display.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file for the demo driver.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<DemoConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(DemoConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DemoConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
