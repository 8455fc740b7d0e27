pub mod handler;
pub mod registry;
pub mod text;

pub use handler::{ToolDef, ToolHandler};
pub use registry::ToolRegistry;
