//! Interactive front end: command parsing, the read-eval loop and output styling.

mod command;
mod shell;
mod style;

pub use shell::{Shell, ShellError, ShellSettings};
pub use style::Style;
