use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::engine::engine_config::EngineConfig;
use crate::selection::selection_model::SelectionMode;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "element-picker",
    version,
    about = "Headless element selection engine: replay gestures against a page snapshot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: element-picker.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay gesture scripts against a page fixture
    Replay {
        /// Path to the page fixture (JSON)
        #[arg(long)]
        page: String,

        /// Path to a gesture script YAML file or a directory of them
        #[arg(long)]
        script: String,

        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,

        /// Append engine notifications to this JSONL file
        #[arg(long)]
        trace: Option<String>,

        /// Starting mode for scripts that do not set one
        #[arg(long)]
        mode: Option<SelectionMode>,
    },

    /// Describe the page element under a point
    Probe {
        #[arg(long)]
        page: String,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },

    /// List elements similar to the one under a point
    Similar {
        #[arg(long)]
        page: String,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `element-picker.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub trace: Option<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            trace: None,
        }
    }
}

fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("element-picker.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Engine config with CLI overrides applied on top of the file.
pub fn build_engine_config(file: &AppConfig, mode: Option<SelectionMode>) -> EngineConfig {
    let mut engine = file.engine.clone();
    if let Some(mode) = mode {
        engine.default_mode = mode;
    }
    engine
}
