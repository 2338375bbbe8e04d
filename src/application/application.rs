use std::io::{self, Cursor, Write};
use std::path::PathBuf;

use compio::fs;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::config::{ConfigCreationError, ShellConfig};
use crate::session::{Session, SessionError};
use crate::shell::{Shell, ShellError, ShellSettings, Style};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        Self::run_with_output(runtime_config, &mut io::stdout()).await
    }

    /// Same as [`Self::run`], but command output goes to `output`.
    pub async fn run_with_output(
        runtime_config: impl Into<RuntimeConfig>,
        output: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = ShellConfig::load(runtime_config.config.as_deref())
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let color = runtime_config.color.unwrap_or(config.color);
        let style = if color.should_colorize() {
            Style::colored()
        } else {
            Style::plain()
        };
        colored::control::set_override(style.is_colored());

        let mut session = Session::new();
        session.seed(&config.tree).context(SeedSnafu)?;
        info!("Seeded tree with {} nodes", session.tree().len());

        match runtime_config.script {
            Some(path) => {
                let script = Self::read_script(path).await?;
                let mut shell = Shell::new(session, ShellSettings::scripted(style));
                shell
                    .run(Cursor::new(script), output)
                    .context(ShellSnafu)?;
            }
            None => {
                let mut shell = Shell::new(session, ShellSettings::interactive(&config, style));
                shell
                    .run(io::stdin().lock(), output)
                    .context(ShellSnafu)?;
            }
        }

        Ok(())
    }

    async fn read_script(path: PathBuf) -> Result<Vec<u8>, ApplicationError> {
        debug!("Reading script file: {}", path.display());
        fs::read(&path).await.context(ScriptReadSnafu {
            file_path: path.display().to_string(),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigCreationError },
    #[snafu(display("Failed to seed the initial tree"))]
    SeedError { source: SessionError },
    #[snafu(display("Failed to read the script file: {}", file_path))]
    ScriptReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Critical failure encountered while running the shell"))]
    ShellError { source: ShellError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[compio::test]
    async fn application_fails_on_missing_config() {
        let runtime_config = RuntimeConfig {
            config: Some(PathBuf::from("/this/config/does/not/exist.yaml")),
            ..RuntimeConfig::default()
        };
        let result = Application::run(runtime_config).await;
        assert!(matches!(result, Err(ApplicationError::ConfigError { .. })));
    }

    #[compio::test]
    async fn application_fails_on_invalid_seed_name() {
        let mut config = NamedTempFile::new().expect("Failed to create temp file");
        write!(config, "tree:\n  \"a/b\": {{}}\n").expect("Failed to write config");

        let runtime_config = RuntimeConfig {
            config: Some(config.path().to_path_buf()),
            ..RuntimeConfig::default()
        };
        let result = Application::run(runtime_config).await;
        assert!(matches!(result, Err(ApplicationError::SeedError { .. })));
    }

    #[compio::test]
    async fn application_fails_on_missing_script() {
        let mut config = NamedTempFile::new().expect("Failed to create temp file");
        write!(config, "color: never\n").expect("Failed to write config");

        let runtime_config = RuntimeConfig {
            config: Some(config.path().to_path_buf()),
            script: Some(PathBuf::from("/this/script/does/not/exist.txt")),
            ..RuntimeConfig::default()
        };
        let result = Application::run(runtime_config).await;
        assert!(matches!(
            result,
            Err(ApplicationError::ScriptReadError { .. })
        ));
    }

    #[compio::test]
    async fn application_runs_script_with_invalid_utf8_line() {
        let config = NamedTempFile::new().expect("Failed to create temp file");
        let mut script = NamedTempFile::new().expect("Failed to create temp file");
        script
            .write_all(b"mkdir a\ncd \xff\ncd a\npwd\n")
            .expect("Failed to write script");

        let runtime_config = RuntimeConfig {
            config: Some(config.path().to_path_buf()),
            script: Some(script.path().to_path_buf()),
            color: Some(crate::application::data::ColorChoice::Never),
        };
        let mut output = Vec::new();
        Application::run_with_output(runtime_config, &mut output)
            .await
            .expect("Application run failed");

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Directory not found: \u{FFFD}\n/a\n"
        );
    }

    #[compio::test]
    async fn application_runs_script_against_seeded_tree() {
        let mut config = NamedTempFile::new().expect("Failed to create temp file");
        write!(config, "tree:\n  docs:\n    notes.txt: hi\n").expect("Failed to write config");
        let mut script = NamedTempFile::new().expect("Failed to create temp file");
        write!(script, "cd docs\nread notes.txt\npwd\nexit\npwd\n").expect("Failed to write script");

        let runtime_config = RuntimeConfig {
            config: Some(config.path().to_path_buf()),
            script: Some(script.path().to_path_buf()),
            color: Some(crate::application::data::ColorChoice::Never),
        };
        let mut output = Vec::new();
        Application::run_with_output(runtime_config, &mut output)
            .await
            .expect("Application run failed");

        assert_eq!(String::from_utf8(output).unwrap(), "hi\n/docs\n");
    }
}
