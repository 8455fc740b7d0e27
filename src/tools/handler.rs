use serde_json::Value;

/// A tool's execution handler. Handlers are pure transforms over the
/// validated `text` argument: total on any string input, no I/O, no
/// shared state. Blanket-implemented for plain functions.
pub trait ToolHandler: Send + Sync {
    fn call(&self, text: &str) -> String;
}

impl<F> ToolHandler for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn call(&self, text: &str) -> String {
        self(text)
    }
}

/// A tool definition: schema for client discovery + handler for execution.
/// The schema is the complete JSON tool definition (name, description,
/// input_schema) advertised over the protocol.
pub struct ToolDef {
    pub name: String,
    pub schema: Value,
    pub(crate) handler: Box<dyn ToolHandler>,
}
