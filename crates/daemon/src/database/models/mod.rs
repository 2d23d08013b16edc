mod file;
mod project;
mod user;

pub use file::{File, FileMeta};
pub use project::Project;
pub use user::User;
