pub mod config;
pub mod error;

pub use config::CloudChatConfig;
pub use error::{CloudChatError, Result};
