use snafu::{OptionExt, Snafu, ensure};
use tracing::debug;

use crate::ext::SEPARATOR;
use crate::filesystem::{Entry, Listing, Node, NodeId};

pub const ROOT_NAME: &str = "/";

/// Arena-backed directory tree.
///
/// Every directory owns its children through its name map; the arena slot of
/// each child records the parent index so ancestry can be rebuilt without
/// any navigation state. Removed subtrees leave empty slots behind, so a
/// `NodeId` is never reused for a different node.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Entry>>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        let root = Entry {
            name: ROOT_NAME.to_string(),
            parent: None,
            node: Node::empty_directory(),
        };
        Self {
            slots: vec![Some(root)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.entry(id).map(Entry::name)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id).and_then(Entry::parent)
    }

    pub fn is_directory(&self, id: NodeId) -> bool {
        self.entry(id).is_some_and(|entry| entry.node.is_directory())
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Chain of directories from the root down to `id`, both ends included.
    /// Built from parent indices alone.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.entry(id).map(|_| id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.parent_of(current);
        }
        chain.reverse();
        chain
    }

    pub fn create_child_file(&mut self, dir: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.insert_child(dir, name, Node::empty_file())
    }

    pub fn create_child_directory(&mut self, dir: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.insert_child(dir, name, Node::empty_directory())
    }

    fn insert_child(&mut self, dir: NodeId, name: &str, node: Node) -> Result<NodeId, TreeError> {
        validate_name(name)?;
        let children = self
            .entry(dir)
            .and_then(|entry| entry.node.children())
            .context(NotADirectorySnafu { id: dir })?;
        ensure!(!children.contains_key(name), AlreadyExistsSnafu { name });

        let id = NodeId::from(self.slots.len());
        self.slots.push(Some(Entry {
            name: name.to_string(),
            parent: Some(dir),
            node,
        }));
        if let Some(children) = self
            .entry_mut(dir)
            .and_then(|entry| entry.node.children_mut())
        {
            children.insert(name.to_string(), id);
        }

        debug!("Inserted '{}' as {} under {}", name, id, dir);
        Ok(id)
    }

    fn child(&self, dir: NodeId, name: &str) -> Option<&Entry> {
        self.entry(dir)
            .and_then(|entry| entry.node.children())
            .and_then(|children| children.get(name))
            .and_then(|&id| self.entry(id))
    }

    /// Looks up a child directory. A file of the same name counts as absent.
    pub fn get_directory(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        let id = self
            .entry(dir)
            .and_then(|entry| entry.node.children())
            .and_then(|children| children.get(name))
            .copied()?;
        self.is_directory(id).then_some(id)
    }

    /// Looks up a child file's content. A directory of the same name counts as absent.
    pub fn get_file(&self, dir: NodeId, name: &str) -> Option<&str> {
        self.child(dir, name).and_then(|entry| entry.node.content())
    }

    pub fn get_file_mut(&mut self, dir: NodeId, name: &str) -> Option<&mut String> {
        let id = self
            .entry(dir)
            .and_then(|entry| entry.node.children())
            .and_then(|children| children.get(name))
            .copied()?;
        self.entry_mut(id)
            .and_then(|entry| entry.node.content_mut())
    }

    pub fn list_contents(&self, dir: NodeId) -> Listing {
        let mut listing = Listing::default();
        let Some(children) = self.entry(dir).and_then(|entry| entry.node.children()) else {
            return listing;
        };

        for (name, &id) in children {
            match self.entry(id).map(Entry::node) {
                Some(Node::Directory { .. }) => listing.directories.push(name.clone()),
                Some(Node::File { .. }) => listing.files.push(name.clone()),
                None => {}
            }
        }
        listing
    }

    /// Detaches a child and releases its whole subtree.
    #[allow(dead_code)]
    pub fn remove_child(&mut self, dir: NodeId, name: &str) -> Result<(), TreeError> {
        let id = self
            .entry_mut(dir)
            .and_then(|entry| entry.node.children_mut())
            .context(NotADirectorySnafu { id: dir })?
            .remove(name)
            .context(NoSuchChildSnafu { name })?;

        let mut pending = vec![id];
        let mut released = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(entry) = self.slots.get_mut(next.index()).and_then(Option::take) {
                if let Some(children) = entry.node.children() {
                    pending.extend(children.values().copied());
                }
                released += 1;
            }
        }

        debug!("Removed '{}' under {} ({} nodes released)", name, dir, released);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    ensure!(
        !name.is_empty() && !name.contains(SEPARATOR) && name != "." && name != "..",
        InvalidNameSnafu { name }
    );
    Ok(())
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeError {
    #[snafu(display("an entry named '{}' already exists", name))]
    AlreadyExistsError { name: String },
    #[snafu(display("'{}' is not a valid name", name))]
    InvalidNameError { name: String },
    #[snafu(display("no entry named '{}'", name))]
    NoSuchChildError { name: String },
    #[snafu(display("node {} is not a directory", id))]
    NotADirectoryError { id: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.name_of(tree.root()), Some(ROOT_NAME));
        assert_eq!(tree.parent_of(tree.root()), None);
        assert!(tree.is_directory(tree.root()));
    }

    #[test]
    fn test_create_child_file_and_directory() {
        let mut tree = Tree::new();
        let docs = tree.create_child_directory(tree.root(), "docs").unwrap();
        tree.create_child_file(docs, "notes.txt").unwrap();

        assert_eq!(tree.get_directory(tree.root(), "docs"), Some(docs));
        assert_eq!(tree.get_file(docs, "notes.txt"), Some(""));
        assert_eq!(tree.parent_of(docs), Some(tree.root()));
    }

    #[test]
    fn test_create_existing_name_fails_and_keeps_entry() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create_child_file(root, "a").unwrap();
        *tree.get_file_mut(root, "a").unwrap() = "kept".to_string();

        let file_again = tree.create_child_file(root, "a");
        let dir_again = tree.create_child_directory(root, "a");

        assert_eq!(
            file_again,
            Err(TreeError::AlreadyExistsError { name: "a".into() })
        );
        assert_eq!(
            dir_again,
            Err(TreeError::AlreadyExistsError { name: "a".into() })
        );
        assert_eq!(tree.get_file(root, "a"), Some("kept"));
        assert_eq!(tree.len(), 2);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("a/b")]
    #[case("/")]
    fn test_invalid_names_are_rejected(#[case] name: &str) {
        let mut tree = Tree::new();
        let result = tree.create_child_directory(tree.root(), name);
        assert!(matches!(result, Err(TreeError::InvalidNameError { .. })));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_lookup_of_wrong_variant_is_absent() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create_child_file(root, "file").unwrap();
        tree.create_child_directory(root, "dir").unwrap();

        assert_eq!(tree.get_directory(root, "file"), None);
        assert_eq!(tree.get_file(root, "dir"), None);
        assert!(tree.get_file_mut(root, "dir").is_none());
        assert_eq!(tree.get_directory(root, "missing"), None);
    }

    #[test]
    fn test_creating_under_a_file_fails() {
        let mut tree = Tree::new();
        let file = tree.create_child_file(tree.root(), "file").unwrap();
        let result = tree.create_child_file(file, "inner");
        assert_eq!(result, Err(TreeError::NotADirectoryError { id: file }));
    }

    #[test]
    fn test_list_contents_keeps_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create_child_directory(root, "zeta").unwrap();
        tree.create_child_file(root, "b.txt").unwrap();
        tree.create_child_directory(root, "alpha").unwrap();
        tree.create_child_file(root, "a.txt").unwrap();

        let listing = tree.list_contents(root);
        assert_eq!(listing.directories, vec!["zeta", "alpha"]);
        assert_eq!(listing.files, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_ancestry_follows_parent_indices() {
        let mut tree = Tree::new();
        let a = tree.create_child_directory(tree.root(), "a").unwrap();
        let b = tree.create_child_directory(a, "b").unwrap();
        let c = tree.create_child_directory(b, "c").unwrap();

        assert_eq!(tree.ancestry(c), vec![tree.root(), a, b, c]);
        assert_eq!(tree.ancestry(tree.root()), vec![tree.root()]);
    }

    #[test]
    fn test_remove_child_releases_subtree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_child_directory(root, "a").unwrap();
        let b = tree.create_child_directory(a, "b").unwrap();
        tree.create_child_file(b, "deep.txt").unwrap();
        tree.create_child_file(root, "keep.txt").unwrap();
        assert_eq!(tree.len(), 5);

        tree.remove_child(root, "a").unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_directory(root, "a"), None);
        assert!(tree.entry(b).is_none());
        assert_eq!(tree.get_file(root, "keep.txt"), Some(""));
        assert_eq!(tree.list_contents(root).directories, Vec::<String>::new());
    }

    #[test]
    fn test_remove_missing_child_fails() {
        let mut tree = Tree::new();
        let result = tree.remove_child(tree.root(), "ghost");
        assert_eq!(
            result,
            Err(TreeError::NoSuchChildError {
                name: "ghost".into()
            })
        );
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut tree = Tree::new();
        let root = tree.root();
        let first = tree.create_child_directory(root, "a").unwrap();
        tree.remove_child(root, "a").unwrap();
        let second = tree.create_child_directory(root, "a").unwrap();
        assert_ne!(first, second);
    }
}
