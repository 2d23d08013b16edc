//! # Project tree
//!
//! The client keeps a projection of the user's projects and files as a forest:
//! every project is a root [`Folder`](NodeKind::Folder) and files hang off it
//! (optionally under nested folders).
//!
//! The forest is an arena keyed by node id rather than a nested structure.
//! Reducers never mutate a snapshot in place; they return a new [`Forest`]
//! where every node that did not change is the *same* `Arc` as before, so a
//! rendering layer can skip work with `Arc::ptr_eq`.
//!
//! [`TreeStore`] is the state container a UI root owns; all changes go
//! through [`TreeStore::dispatch`].

mod forest;
mod node;
mod store;

pub use forest::Forest;
pub use node::{NestedNode, Node, NodeId, NodeKind};
pub use store::{TreeAction, TreeState, TreeStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node already present in tree: {0}")]
    DuplicateNode(NodeId),
    #[error("project not found at top level: {0}")]
    ProjectNotFound(NodeId),
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("expected a folder node: {0}")]
    NotAFolder(NodeId),
    #[error("expected a file node: {0}")]
    NotAFile(NodeId),
}
