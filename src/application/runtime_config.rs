use std::path::PathBuf;

use crate::application::data::ColorChoice;
use crate::cli::Cli;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub config: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub color: Option<ColorChoice>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            script: cli.script,
            color: cli.color,
        }
    }
}
