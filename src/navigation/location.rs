use crate::ext::{ROOT_PATH, SEPARATOR};
use crate::filesystem::{NodeId, Tree};

/// Where a session currently stands.
///
/// The breadcrumb chain always starts at the root and ends at the current
/// directory, so the current directory is the last breadcrumb and the two
/// can only ever change together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    breadcrumbs: Vec<NodeId>,
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl Location {
    pub fn root() -> Self {
        Self {
            breadcrumbs: vec![NodeId::ROOT],
        }
    }

    pub fn current(&self) -> NodeId {
        self.breadcrumbs.last().copied().unwrap_or(NodeId::ROOT)
    }

    pub fn breadcrumbs(&self) -> &[NodeId] {
        &self.breadcrumbs
    }

    pub fn is_root(&self) -> bool {
        self.breadcrumbs.len() <= 1
    }

    pub(super) fn push(&mut self, id: NodeId) {
        self.breadcrumbs.push(id);
    }

    /// Drops the last breadcrumb. The root is never dropped.
    pub(super) fn pop(&mut self) -> Option<NodeId> {
        if self.is_root() {
            return None;
        }
        self.breadcrumbs.pop()
    }

    /// Absolute path of the current directory, e.g. `/a/b`.
    pub fn render(&self, tree: &Tree) -> String {
        let names = self
            .breadcrumbs
            .iter()
            .skip(1)
            .filter_map(|&id| tree.name_of(id))
            .collect::<Vec<_>>();

        if names.is_empty() {
            ROOT_PATH.to_string()
        } else {
            let mut rendered = String::new();
            for name in names {
                rendered.push(SEPARATOR);
                rendered.push_str(name);
            }
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_location() {
        let location = Location::root();
        assert!(location.is_root());
        assert_eq!(location.current(), NodeId::ROOT);
        assert_eq!(location.breadcrumbs(), &[NodeId::ROOT]);
        assert_eq!(location.render(&Tree::new()), "/");
    }

    #[test]
    fn test_pop_never_drops_root() {
        let mut location = Location::root();
        assert_eq!(location.pop(), None);
        assert_eq!(location, Location::root());
    }

    #[test]
    fn test_push_pop_moves_current() {
        let mut tree = Tree::new();
        let a = tree.create_child_directory(tree.root(), "a").unwrap();
        let b = tree.create_child_directory(a, "b").unwrap();

        let mut location = Location::root();
        location.push(a);
        location.push(b);
        assert_eq!(location.current(), b);
        assert_eq!(location.render(&tree), "/a/b");

        assert_eq!(location.pop(), Some(b));
        assert_eq!(location.current(), a);
        assert_eq!(location.render(&tree), "/a");
    }
}
