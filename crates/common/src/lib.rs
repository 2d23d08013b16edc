/**
 * Identity claims carried by session tokens.
 *  Shared so the daemon (which signs them) and
 *  clients (which only read them) agree on shape.
 */
pub mod claims;
/**
 * Editor helpers, currently language detection
 *  from a file name.
 */
pub mod editor;
/**
 * The error envelope every failed API response
 *  carries, and the code -> status table.
 */
pub mod error;
/**
 * Client-side session restored from a stored
 *  access token.
 */
pub mod session;
/**
 * Client-side projection of projects and files
 *  as a forest of folder/file nodes.
 */
pub mod tree;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::claims::Claims;
    pub use crate::editor::Language;
    pub use crate::error::{ErrorCode, ErrorEnvelope};
    pub use crate::session::Session;
    pub use crate::tree::{Forest, NestedNode, Node, NodeId, TreeAction, TreeError, TreeStore};
    pub use crate::version::BuildInfo;
}
