use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel};

/// Interactive in-memory directory tree
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML configuration file [default: ./arbor.yaml when present]
    #[clap(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run commands from a file instead of stdin
    #[clap(long, short, value_name = "FILE")]
    pub script: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Overrides the `color` setting of the configuration file
    #[clap(long, value_enum)]
    pub color: Option<ColorChoice>,
}
