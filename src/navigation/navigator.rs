use snafu::{OptionExt, Snafu};
use tracing::debug;

use crate::ext::{PathSegmentsExt, ROOT_PATH, Segment};
use crate::filesystem::Tree;
use crate::navigation::Location;

/// Resolves slash-delimited paths against a [`Tree`].
///
/// Resolution never touches the caller's [`Location`]: it works on a copy
/// and hands back the resolved one, so a failed walk leaves nothing behind.
/// Callers that change directory replace their location with the result.
pub struct Navigator<'a> {
    tree: &'a Tree,
}

impl<'a> Navigator<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self { tree }
    }

    pub fn resolve(&self, path: &str, from: &Location) -> Result<Location, ResolveError> {
        if path == ROOT_PATH {
            return Ok(Location::root());
        }

        let mut location = if path.is_absolute_path() {
            Location::root()
        } else {
            from.clone()
        };

        for segment in path.path_segments() {
            match segment {
                Segment::Parent => self.ascend(&mut location),
                Segment::Name(name) => self.descend(&mut location, name)?,
            }
        }

        debug!(
            "Resolved '{}' to {}",
            path,
            location.render(self.tree)
        );
        Ok(location)
    }

    /// `..` at the root stays at the root.
    fn ascend(&self, location: &mut Location) {
        match location.pop() {
            Some(left) => {
                debug_assert_eq!(
                    self.tree.parent_of(left),
                    Some(location.current()),
                    "breadcrumbs disagree with the tree's parent index"
                );
            }
            None => debug!("Already at root, ignoring '..'"),
        }
    }

    fn descend(&self, location: &mut Location, name: &str) -> Result<(), ResolveError> {
        let child = self
            .tree
            .get_directory(location.current(), name)
            .context(NotFoundSnafu { segment: name })?;
        location.push(child);
        Ok(())
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ResolveError {
    #[snafu(display("no directory named '{}'", segment))]
    NotFoundError { segment: String },
}
