pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Ai, Daemon, File, Health, Init, Login, Logout, Project, Register, Tree, Version};
