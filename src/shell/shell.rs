use std::io::{BufRead, Write};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::config::ShellConfig;
use crate::session::{Session, SessionError};
use crate::shell::command::{Command, HELP};
use crate::shell::Style;

/// Presentation settings of a [`Shell`].
#[derive(Debug, Clone, Default)]
pub struct ShellSettings {
    prompt: Option<String>,
    banner: Option<String>,
    style: Style,
}

impl ShellSettings {
    /// Prompt and banner from the configuration; an empty banner is not shown.
    pub fn interactive(config: &ShellConfig, style: Style) -> Self {
        Self {
            prompt: Some(config.prompt.clone()),
            banner: Some(config.banner.clone()).filter(|banner| !banner.is_empty()),
            style,
        }
    }

    /// No prompt or banner, only command output.
    pub fn scripted(style: Style) -> Self {
        Self {
            prompt: None,
            banner: None,
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Line-oriented front end that turns commands into [`Session`] calls and
/// renders their outcomes.
pub struct Shell {
    session: Session,
    settings: ShellSettings,
}

impl Shell {
    pub fn new(session: Session, settings: ShellSettings) -> Self {
        Self { session, settings }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `exit` or the end of `input`. Bytes that are not UTF-8 are
    /// replaced rather than ending the session.
    pub fn run(&mut self, mut input: impl BufRead, output: &mut impl Write) -> Result<(), ShellError> {
        if let Some(banner) = &self.settings.banner {
            writeln!(output, "{banner}").context(OutputSnafu)?;
        }

        let mut buffer = Vec::new();
        loop {
            self.write_prompt(output)?;
            buffer.clear();
            if input.read_until(b'\n', &mut buffer).context(InputSnafu)? == 0 {
                debug!("Reached end of input");
                if self.settings.prompt.is_some() {
                    writeln!(output).context(OutputSnafu)?;
                }
                break;
            }
            let line = String::from_utf8_lossy(trim_line_ending(&buffer));

            if self.execute(Command::from(line.as_ref()), output)? == Flow::Exit {
                break;
            }
        }

        output.flush().context(OutputSnafu)
    }

    fn write_prompt(&self, output: &mut impl Write) -> Result<(), ShellError> {
        if let Some(prompt) = &self.settings.prompt {
            write!(output, "{}", self.settings.style.prompt(prompt)).context(OutputSnafu)?;
            output.flush().context(OutputSnafu)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command<'_>, output: &mut impl Write) -> Result<Flow, ShellError> {
        debug!("Executing {:?}", command);
        let outcome = match command {
            Command::MakeDirectory { name } => self.session.create_directory(name),
            Command::MakeFile { path } => self.session.create_file(path),
            Command::Write { path, content } => self.session.write_file(path, content),
            Command::Read { path } => {
                // A missing file reads as an empty line
                let content = self.session.read_file(path).unwrap_or_else(|error| {
                    debug!("Read of '{}' failed: {}", path, error);
                    ""
                });
                writeln!(output, "{content}").context(OutputSnafu)?;
                Ok(())
            }
            Command::List { path } => match self.session.list_directory(path) {
                Ok(listing) => {
                    let rendered = self.settings.style.listing(&listing);
                    write!(output, "{rendered}").context(OutputSnafu)?;
                    Ok(())
                }
                Err(error) => Err(error),
            },
            Command::ChangeDirectory { path } => self.session.change_directory(path),
            Command::PrintWorkingDirectory => {
                writeln!(output, "{}", self.session.working_directory()).context(OutputSnafu)?;
                Ok(())
            }
            Command::Help => {
                writeln!(output, "{HELP}").context(OutputSnafu)?;
                Ok(())
            }
            Command::Exit => return Ok(Flow::Exit),
            Command::Empty => Ok(()),
            Command::Unknown { verb } => {
                let message = format!("Unknown command: {verb}");
                writeln!(output, "{}", self.settings.style.error(&message)).context(OutputSnafu)?;
                Ok(())
            }
        };

        if let Err(error) = outcome {
            self.report(&error, output)?;
        }
        Ok(Flow::Continue)
    }

    fn report(&self, error: &SessionError, output: &mut impl Write) -> Result<(), ShellError> {
        debug!("Command failed: {:?}", error);
        writeln!(output, "{}", self.settings.style.error(&error.to_string())).context(OutputSnafu)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[derive(Debug, Snafu)]
pub enum ShellError {
    #[snafu(display("Failed to read a command"))]
    InputError { source: std::io::Error },
    #[snafu(display("Failed to write shell output"))]
    OutputError { source: std::io::Error },
}
