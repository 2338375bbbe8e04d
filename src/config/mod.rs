mod seed_entry;
mod shell_config;

pub use seed_entry::SeedEntry;
pub use shell_config::{ConfigCreationError, ShellConfig};
