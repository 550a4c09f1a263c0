//! Tool definitions and tool calls for OpenAI function calling.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use openai_client::ToolDefinition;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct SearchArgs {
//!     query: String,
//! }
//!
//! let search = ToolDefinition::for_args::<SearchArgs>("web_search", "Search the web");
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::schema::StructuredOutput;

/// OpenAI tool definition format.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// The name of the tool.
    pub name: String,

    /// A description of what the tool does.
    pub description: String,

    /// JSON schema for the tool's parameters.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a definition from an explicit parameter schema.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Create a definition whose parameter schema is generated from `T`.
    pub fn for_args<T: StructuredOutput>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, description, T::openai_schema())
    }

    /// Convert to OpenAI API format.
    pub fn to_openai_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// A tool call from the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ToolCallRaw")]
pub struct ToolCall {
    /// The ID of this tool call (for matching responses).
    pub id: String,

    /// The name of the tool to call.
    pub name: String,

    /// The arguments as a JSON string.
    pub arguments: String,
}

#[derive(Deserialize)]
struct ToolCallRaw {
    #[serde(default)]
    id: String,
    function: FunctionCallRaw,
}

#[derive(Deserialize)]
struct FunctionCallRaw {
    name: String,
    #[serde(default)]
    arguments: String,
}

impl From<ToolCallRaw> for ToolCall {
    fn from(raw: ToolCallRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.function.name,
            arguments: raw.function.arguments,
        }
    }
}

impl ToolCall {
    /// Parse arguments into a typed struct.
    pub fn parse_args<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[derive(Deserialize, JsonSchema)]
    struct EchoArgs {
        message: String,
    }

    #[test]
    fn test_tool_definition_from_args() {
        let def = ToolDefinition::for_args::<EchoArgs>("echo", "Echo back the input message");

        assert_eq!(def.name, "echo");
        assert_eq!(def.description, "Echo back the input message");
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(def.parameters["properties"]["message"]["type"], "string");
    }

    #[test]
    fn test_tool_definition_openai_format() {
        let def = ToolDefinition::for_args::<EchoArgs>("echo", "Echo");
        let openai_format = def.to_openai_format();

        assert_eq!(openai_format["type"], "function");
        assert_eq!(openai_format["function"]["name"], "echo");
        assert_eq!(openai_format["function"]["parameters"]["required"][0], "message");
    }

    #[test]
    fn test_tool_call_parsing() {
        let value = serde_json::json!({
            "id": "call_123",
            "type": "function",
            "function": {
                "name": "echo",
                "arguments": "{\"message\": \"hello\"}"
            }
        });

        let call: ToolCall = serde_json::from_value(value).unwrap();
        assert_eq!(call.id, "call_123");
        assert_eq!(call.name, "echo");

        let args: EchoArgs = call.parse_args().unwrap();
        assert_eq!(args.message, "hello");
    }
}
