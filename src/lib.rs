pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use error::{ConfigError, ToolError};
pub use server::TextToolServer;
pub use tools::{ToolDef, ToolHandler, ToolRegistry};
