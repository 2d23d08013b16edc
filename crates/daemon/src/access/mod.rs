pub mod ownership;
pub mod resources;

pub use ownership::{Access, AccessError, ResourceLookup};
pub use resources::{NewFile, ResourceError, Resources};
