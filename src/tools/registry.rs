use serde_json::{json, Value};
use tracing::warn;

use super::handler::{ToolDef, ToolHandler};
use super::text;
use crate::error::ToolError;

/// Catalog of available tools. Stores definitions, provides schemas for
/// client discovery, and dispatches invocations by name.
///
/// Built once at startup and read-only afterwards, so it is safe to share
/// across concurrent sessions behind an `Arc` with no locking.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The full text-utilities tool set: all six transforms, each taking a
    /// single required `text` string argument.
    pub fn text_tools() -> Self {
        Self::new()
            .add(
                "reverse_text",
                text_tool_schema(
                    "reverse_text",
                    "Reverses the order of characters in the given text",
                    "The text to reverse",
                ),
                text::reverse,
            )
            .add(
                "uppercase_text",
                text_tool_schema(
                    "uppercase_text",
                    "Converts text to uppercase",
                    "The text to convert to uppercase",
                ),
                text::uppercase,
            )
            .add(
                "lowercase_text",
                text_tool_schema(
                    "lowercase_text",
                    "Converts text to lowercase",
                    "The text to convert to lowercase",
                ),
                text::lowercase,
            )
            .add(
                "word_count",
                text_tool_schema(
                    "word_count",
                    "Counts the number of words in the given text",
                    "The text to count words in",
                ),
                text::word_count,
            )
            .add(
                "character_count",
                text_tool_schema(
                    "character_count",
                    "Counts the number of characters (including spaces) in the given text",
                    "The text to count characters in",
                ),
                text::character_count,
            )
            .add(
                "shuffle_text",
                text_tool_schema(
                    "shuffle_text",
                    "Randomly shuffles the characters in the given text",
                    "The text to shuffle",
                ),
                text::shuffle,
            )
    }

    /// Register a tool. The schema is the complete JSON tool definition
    /// (name, description, input_schema) advertised to clients.
    pub fn add(
        mut self,
        name: impl Into<String>,
        schema: Value,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        self.tools.push(ToolDef {
            name: name.into(),
            schema,
            handler: Box::new(handler),
        });
        self
    }

    /// All tool schemas, for listing.
    pub fn schemas(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.schema.clone()).collect()
    }

    /// Schema for a specific tool by name.
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.tools.iter().find(|t| t.name == name).map(|t| &t.schema)
    }

    /// Resolve a tool by name, validate its arguments, and invoke it.
    ///
    /// The `text` field of `arguments` must be present and a JSON string;
    /// validation happens before any transform runs. Transforms themselves
    /// are total, so these two checks are the only failure modes.
    pub fn dispatch(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| {
                warn!(tool = name, "invocation of unregistered tool rejected");
                ToolError::UnknownTool(name.to_string())
            })?;

        let text = match arguments.get("text") {
            Some(Value::String(s)) => s,
            Some(other) => {
                warn!(tool = name, "invocation rejected, `text` is not a string");
                return Err(ToolError::InvalidArgument(format!(
                    "`text` must be a string, got {}",
                    json_type_name(other)
                )));
            }
            None => {
                warn!(tool = name, "invocation rejected, `text` is missing");
                return Err(ToolError::InvalidArgument(
                    "required argument `text` is missing".into(),
                ));
            }
        };

        Ok(tool.handler.call(text))
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for a tool taking a single required `text` string argument.
fn text_tool_schema(name: &str, description: &str, arg_description: &str) -> Value {
    json!({
        "name": name,
        "description": description,
        "input_schema": {
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": arg_description,
                }
            },
            "required": ["text"],
        }
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tools_registers_all_six() {
        let reg = ToolRegistry::text_tools();
        assert_eq!(reg.len(), 6);
        assert_eq!(
            reg.tool_names(),
            vec![
                "reverse_text",
                "uppercase_text",
                "lowercase_text",
                "word_count",
                "character_count",
                "shuffle_text",
            ]
        );
    }

    #[test]
    fn tool_names_are_unique() {
        let reg = ToolRegistry::text_tools();
        let mut names = reg.tool_names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn schemas_carry_required_text_field() {
        let reg = ToolRegistry::text_tools();
        for schema in reg.schemas() {
            assert!(schema["name"].is_string());
            assert!(schema["description"].is_string());
            assert_eq!(schema["input_schema"]["type"], "object");
            assert_eq!(schema["input_schema"]["required"][0], "text");
            assert!(schema["input_schema"]["properties"]["text"].is_object());
        }
    }

    #[test]
    fn schema_lookup_by_name() {
        let reg = ToolRegistry::text_tools();
        let schema = reg.schema("word_count").unwrap();
        assert_eq!(schema["name"], "word_count");
        assert!(reg.schema("no_such_tool").is_none());
    }

    #[test]
    fn dispatch_end_to_end() {
        let reg = ToolRegistry::text_tools();
        assert_eq!(
            reg.dispatch("reverse_text", &json!({"text": "hello"})).unwrap(),
            "olleh"
        );
        assert_eq!(
            reg.dispatch("uppercase_text", &json!({"text": "Hi"})).unwrap(),
            "HI"
        );
        assert_eq!(
            reg.dispatch("lowercase_text", &json!({"text": "Hi"})).unwrap(),
            "hi"
        );
        assert_eq!(
            reg.dispatch("word_count", &json!({"text": "the quick fox"})).unwrap(),
            "3"
        );
        assert_eq!(
            reg.dispatch("character_count", &json!({"text": "hello"})).unwrap(),
            "5"
        );
    }

    #[test]
    fn dispatch_accepts_empty_text() {
        let reg = ToolRegistry::text_tools();
        for name in ["reverse_text", "uppercase_text", "lowercase_text", "shuffle_text"] {
            assert_eq!(reg.dispatch(name, &json!({"text": ""})).unwrap(), "");
        }
        for name in ["word_count", "character_count"] {
            assert_eq!(reg.dispatch(name, &json!({"text": ""})).unwrap(), "0");
        }
    }

    #[test]
    fn dispatch_shuffle_is_a_permutation() {
        let reg = ToolRegistry::text_tools();
        let out = reg
            .dispatch("shuffle_text", &json!({"text": "hello world"}))
            .unwrap();
        let mut got: Vec<char> = out.chars().collect();
        let mut want: Vec<char> = "hello world".chars().collect();
        got.sort_unstable();
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn dispatch_unknown_tool() {
        let reg = ToolRegistry::text_tools();
        let err = reg
            .dispatch("nonexistent_tool", &json!({"text": "x"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
        assert!(err.to_string().contains("nonexistent_tool"));
    }

    #[test]
    fn dispatch_missing_text_argument() {
        let reg = ToolRegistry::text_tools();
        let err = reg.dispatch("reverse_text", &json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn dispatch_non_string_text_argument() {
        let reg = ToolRegistry::text_tools();
        let err = reg
            .dispatch("reverse_text", &json!({"text": 42}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn failed_dispatch_does_not_poison_the_registry() {
        let reg = ToolRegistry::text_tools();
        let _ = reg.dispatch("nonexistent_tool", &json!({"text": "x"}));
        let _ = reg.dispatch("reverse_text", &json!({}));
        assert_eq!(
            reg.dispatch("reverse_text", &json!({"text": "hello"})).unwrap(),
            "olleh"
        );
    }
}
