//! Path resolution over the directory tree.

mod location;
mod navigator;

pub use location::Location;
pub use navigator::{Navigator, ResolveError};
