pub mod ai;
pub mod daemon;
pub mod file;
pub mod health;
pub mod init;
pub mod login;
pub mod logout;
pub mod project;
pub mod register;
pub mod tree;
pub mod version;

pub use ai::Ai;
pub use daemon::Daemon;
pub use file::File;
pub use health::Health;
pub use init::Init;
pub use login::Login;
pub use logout::Logout;
pub use project::Project;
pub use register::Register;
pub use tree::Tree;
pub use version::Version;
