mod action;
mod proxy;

pub use action::TextAction;
pub use proxy::{AiConfig, AiError, TextActionProxy};
