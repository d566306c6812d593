use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for switchboard
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Inspect and edit stored experiment configuration from the command line")]
pub struct Cli {
    /// Settings directory (default: $SWITCHBOARD_HOME or the OS config directory)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Settings namespace
    #[arg(long, global = true, default_value = switchboard::DEFAULT_NAMESPACE)]
    pub namespace: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or set the config server URL
    ServerUrl {
        /// New server URL
        #[arg(long)]
        set: Option<String>,
    },

    /// Show or set the raw experiment configuration JSON
    Config {
        /// New configuration JSON
        #[arg(long, conflicts_with = "file")]
        set: Option<String>,

        /// Read the new configuration JSON from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print whether an experiment is active
    Check {
        /// Experiment name
        name: String,
    },

    /// Print the values payload of an experiment
    Values {
        /// Experiment name
        name: String,
    },

    /// List active experiment names
    Active,

    /// List experiments, optionally filtered by glob patterns
    List {
        /// Glob pattern on experiment names (repeatable, OR logic)
        #[arg(short, long = "query")]
        queries: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputType::JsonObject)]
        output_type: OutputType,
    },

    /// Print the device UUID, creating one if needed
    DeviceId,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    /// Object keyed by experiment name
    JsonObject,
    /// Array of entries carrying a `name` field
    JsonArray,
}
