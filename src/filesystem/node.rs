use derive_more::{Display, From, Into, IsVariant};
use hashlink::LinkedHashMap;

/// Stable handle of a node inside a [`Tree`](super::Tree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub(super) fn index(self) -> usize {
        self.0
    }
}

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Node {
    File {
        content: String,
    },
    Directory {
        children: LinkedHashMap<String, NodeId>,
    },
}

impl Node {
    pub fn empty_file() -> Self {
        Node::File {
            content: String::new(),
        }
    }

    pub fn empty_directory() -> Self {
        Node::Directory {
            children: LinkedHashMap::new(),
        }
    }

    pub fn children(&self) -> Option<&LinkedHashMap<String, NodeId>> {
        match self {
            Node::Directory { children } => Some(children),
            Node::File { .. } => None,
        }
    }

    pub(super) fn children_mut(&mut self) -> Option<&mut LinkedHashMap<String, NodeId>> {
        match self {
            Node::Directory { children } => Some(children),
            Node::File { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    pub(super) fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }
}

/// One arena slot: the node plus its name and the index of its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(super) name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) node: Node,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}
