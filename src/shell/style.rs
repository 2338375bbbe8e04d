use colored::Colorize;

use crate::ext::SEPARATOR;
use crate::filesystem::Listing;

/// Decides how shell output is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    colored: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn prompt(&self, prompt: &str) -> String {
        if self.colored {
            prompt.green().bold().to_string()
        } else {
            prompt.to_string()
        }
    }

    pub fn error(&self, message: &str) -> String {
        if self.colored {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }

    pub fn listing(&self, listing: &Listing) -> String {
        if !self.colored {
            return listing.to_string();
        }

        let mut rendered = format!("{}\n", "Directories:".bold());
        for name in &listing.directories {
            rendered.push_str(&format!("  {}\n", format!("{name}{SEPARATOR}").blue().bold()));
        }
        rendered.push_str(&format!("{}\n", "Files:".bold()));
        for name in &listing.files {
            rendered.push_str(&format!("  {name}\n"));
        }
        rendered
    }
}
