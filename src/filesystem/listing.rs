use std::fmt;

use crate::ext::SEPARATOR;

/// Contents of one directory, split by kind and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl Listing {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directories:")?;
        for name in &self.directories {
            writeln!(f, "  {name}{SEPARATOR}")?;
        }
        writeln!(f, "Files:")?;
        for name in &self.files {
            writeln!(f, "  {name}")?;
        }
        Ok(())
    }
}
