use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

use crate::config::SeedEntry;
use crate::ext::PathSegmentsExt;
use crate::filesystem::{Listing, NodeId, Tree, TreeError};
use crate::navigation::{Location, Navigator, ResolveError};

/// One user's view of the namespace: the tree plus where the user stands.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tree: Tree,
    location: Location,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[cfg(test)]
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn working_directory(&self) -> String {
        self.location.render(&self.tree)
    }

    /// Creates a directory in the current location. `name` is a single segment, not a path.
    pub fn create_directory(&mut self, name: &str) -> Result<(), SessionError> {
        self.tree
            .create_child_directory(self.location.current(), name)
            .context(CreateSnafu { path: name })?;
        debug!("Created directory '{}' in {}", name, self.working_directory());
        Ok(())
    }

    pub fn create_file(&mut self, path: &str) -> Result<(), SessionError> {
        let (dir, leaf) = self.resolve_leaf(path)?;
        self.tree
            .create_child_file(dir, leaf)
            .context(CreateSnafu { path })?;
        debug!("Created file '{}'", path);
        Ok(())
    }

    /// Replaces the content of an existing file. Never creates the file.
    pub fn write_file(&mut self, path: &str, content: impl Into<String>) -> Result<(), SessionError> {
        let (dir, leaf) = self.resolve_leaf(path)?;
        let file = self
            .tree
            .get_file_mut(dir, leaf)
            .context(FileNotFoundSnafu { path })?;
        *file = content.into();
        debug!("Wrote {} bytes to '{}'", file.len(), path);
        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<&str, SessionError> {
        let (dir, leaf) = self.resolve_leaf(path)?;
        self.tree
            .get_file(dir, leaf)
            .context(FileNotFoundSnafu { path })
    }

    /// Lists the directory at `path`; an empty path lists the current one.
    pub fn list_directory(&self, path: &str) -> Result<Listing, SessionError> {
        let target = self.resolve_directory(path)?;
        Ok(self.tree.list_contents(target.current()))
    }

    pub fn change_directory(&mut self, path: &str) -> Result<(), SessionError> {
        let target = self.resolve_directory(path)?;
        if target != self.location {
            self.location = target;
            debug!("Changed directory to {}", self.working_directory());
        }
        debug_assert_eq!(
            self.location.breadcrumbs(),
            self.tree.ancestry(self.location.current())
        );
        Ok(())
    }

    /// Populates the tree below the root. The location is left untouched.
    pub fn seed(&mut self, entries: &[SeedEntry]) -> Result<(), SessionError> {
        let root = self.tree.root();
        self.seed_into(root, "", entries)
    }

    fn seed_into(
        &mut self,
        dir: NodeId,
        prefix: &str,
        entries: &[SeedEntry],
    ) -> Result<(), SessionError> {
        for entry in entries {
            let path = format!("{prefix}/{}", entry.name());
            match entry {
                SeedEntry::Directory { name, children } => {
                    let child = self
                        .tree
                        .create_child_directory(dir, name)
                        .context(CreateSnafu { path: &path })?;
                    self.seed_into(child, &path, children)?;
                }
                SeedEntry::File { name, content } => {
                    let file = self
                        .tree
                        .create_child_file(dir, name)
                        .context(CreateSnafu { path: &path })?;
                    if let Some(slot) = self.tree.get_file_mut(dir, name) {
                        *slot = content.clone();
                    }
                    debug!("Seeded file '{}' as {}", path, file);
                }
            }
        }
        Ok(())
    }

    fn resolve_directory(&self, path: &str) -> Result<Location, SessionError> {
        Navigator::new(&self.tree)
            .resolve(path, &self.location)
            .context(DirectoryNotFoundSnafu { path })
    }

    /// Resolves every segment but the last as a directory and returns the
    /// containing directory together with the leaf name.
    fn resolve_leaf<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str), SessionError> {
        let (prefix, leaf) = path.split_leaf();
        let dir = self.resolve_directory(prefix)?;
        Ok((dir.current(), leaf))
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum SessionError {
    #[snafu(display("Directory not found: {}", path))]
    DirectoryNotFoundError { path: String, source: ResolveError },
    #[snafu(display("File not found: {}", path))]
    FileNotFoundError { path: String },
    #[snafu(display("Cannot create {}: {}", path, source))]
    CreateError { path: String, source: TreeError },
}
