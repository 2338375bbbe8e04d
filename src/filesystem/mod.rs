//! In-memory directory tree.
//!
//! Nodes live in an arena owned by [`Tree`]. A directory owns its children
//! through a name map, and each arena slot remembers its parent so that
//! ancestry never depends on external navigation state.

mod listing;
mod node;
mod tree;

pub use listing::Listing;
pub use node::{Entry, Node, NodeId};
pub use tree::{Tree, TreeError};
