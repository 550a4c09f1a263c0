//! OpenAI implementations of the classifier, formatter and request resolver.
//!
//! All three share one explicitly constructed [`OpenAIClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docnotes::ai::{OpenAIClassifier, OpenAIFormatter};
//!
//! let client = OpenAIClient::from_env()?;
//! let classifier = OpenAIClassifier::new(client.clone()).with_model("gpt-4o-mini");
//! let formatter = OpenAIFormatter::new(client);
//! ```

use std::path::Path;

use async_trait::async_trait;
use openai_client::{
    ChatRequest, FunctionRequest, FunctionResponse, Message, OpenAIClient, OpenAIError,
    ToolDefinition,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::{
    format_classify_prompt, format_note_prompt, format_resolve_prompt, FORMAT_SYSTEM_PROMPT,
};
use crate::traits::{classifier::Classifier, formatter::Formatter, resolver::RequestResolver};
use crate::types::{
    document::{parse_formatted_document, parse_pipeline_request, FormattedDocument, PipelineRequest},
    format::{Classification, SupportedFormat},
};

/// Default chat model for all three collaborators.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Arguments of every capability in the catalog.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PathArgs {
    /// Path of the file to extract
    pub path: String,
}

/// Tool definitions offered to the classification oracle, one per format.
pub fn capability_catalog() -> Vec<ToolDefinition> {
    SupportedFormat::ALL
        .into_iter()
        .map(|format| {
            ToolDefinition::for_args::<PathArgs>(format.tool_name(), format.tool_description())
        })
        .collect()
}

/// Interpret the oracle's answer.
///
/// Only the first tool call counts. No call, or a name outside the catalog,
/// means the file is unclassified.
pub fn classification_from_response(response: &FunctionResponse) -> Classification {
    let Some(call) = response.first_call() else {
        return Classification::Unclassified;
    };

    if response.tool_calls.len() > 1 {
        debug!(
            ignored = response.tool_calls.len() - 1,
            "Oracle returned several tool calls, using the first"
        );
    }

    match SupportedFormat::from_tool_name(&call.name) {
        Some(format) => Classification::Classified(format),
        None => {
            warn!(tool = %call.name, "Oracle selected a tool outside the catalog");
            Classification::Unclassified
        }
    }
}

fn ai_error(e: OpenAIError) -> PipelineError {
    PipelineError::AI(Box::new(e))
}

// =============================================================================
// Classifier
// =============================================================================

/// Lets the model pick an extraction tool for each file.
#[derive(Clone)]
pub struct OpenAIClassifier {
    client: OpenAIClient,
    model: String,
    catalog: Vec<ToolDefinition>,
}

impl OpenAIClassifier {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            catalog: capability_catalog(),
        }
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Classifier for OpenAIClassifier {
    async fn classify(&self, path: &Path) -> Result<Classification> {
        let prompt = format_classify_prompt(&path.to_string_lossy());
        let request =
            FunctionRequest::new(&self.model, vec![Message::user(prompt)], &self.catalog);

        let response = self.client.function_calling(request).await.map_err(ai_error)?;
        let classification = classification_from_response(&response);

        match classification {
            Classification::Classified(format) => {
                info!(tool = format.tool_name(), "{} path chosen for {:?}", format, path)
            }
            Classification::Unclassified => info!("No tool chosen for {:?}", path),
        }

        Ok(classification)
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Fills the note template through a JSON-mode chat completion.
#[derive(Clone)]
pub struct OpenAIFormatter {
    client: OpenAIClient,
    model: String,
}

impl OpenAIFormatter {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Formatter for OpenAIFormatter {
    async fn format(&self, text: &str) -> Result<FormattedDocument> {
        if text.trim().is_empty() {
            debug!("Formatting empty extraction");
        }

        let request = ChatRequest::new(&self.model)
            .message(Message::system(FORMAT_SYSTEM_PROMPT))
            .message(Message::user(format_note_prompt(text)))
            .json_object();

        let response = self.client.chat_completion(request).await.map_err(ai_error)?;
        parse_formatted_document(&response.content)
    }
}

// =============================================================================
// Request resolver
// =============================================================================

/// Resolves `"summarize everything in ~/inbox"` into a directory.
#[derive(Clone)]
pub struct OpenAIRequestResolver {
    client: OpenAIClient,
    model: String,
}

impl OpenAIRequestResolver {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl RequestResolver for OpenAIRequestResolver {
    async fn resolve(&self, instruction: &str) -> Result<PipelineRequest> {
        let request = ChatRequest::new(&self.model)
            .message(Message::user(format_resolve_prompt(instruction)))
            .json_object();

        let response = self.client.chat_completion(request).await.map_err(ai_error)?;
        let resolved = parse_pipeline_request(&response.content)?;

        info!(input_dir = ?resolved.input_dir(), "Resolved request");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_client::ToolCall;

    fn call(name: &str) -> ToolCall {
        ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments: r#"{"path": "/in/file"}"#.to_string(),
        }
    }

    #[test]
    fn test_catalog_has_exactly_three_path_tools() {
        let catalog = capability_catalog();
        let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, vec!["parse_pdf", "parse_image", "parse_mp3"]);
        for tool in &catalog {
            assert_eq!(tool.parameters["type"], "object");
            assert_eq!(tool.parameters["properties"]["path"]["type"], "string");
            assert_eq!(tool.parameters["required"], serde_json::json!(["path"]));
        }
    }

    #[test]
    fn test_no_tool_call_is_unclassified() {
        let response = FunctionResponse {
            content: Some("I cannot tell what this is".to_string()),
            tool_calls: vec![],
        };
        assert_eq!(classification_from_response(&response), Classification::Unclassified);
    }

    #[test]
    fn test_only_first_tool_call_is_honored() {
        let response = FunctionResponse {
            content: None,
            tool_calls: vec![call("parse_mp3"), call("parse_pdf")],
        };
        assert_eq!(
            classification_from_response(&response),
            Classification::Classified(SupportedFormat::Audio)
        );
    }

    #[test]
    fn test_unknown_tool_is_unclassified() {
        let response = FunctionResponse {
            content: None,
            tool_calls: vec![call("parse_docx")],
        };
        assert_eq!(classification_from_response(&response), Classification::Unclassified);
    }

    #[test]
    fn test_path_args_parse_from_tool_call() {
        let args: PathArgs = call("parse_pdf").parse_args().unwrap();
        assert_eq!(args.path, "/in/file");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_ai_error() {
        let client = OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:9");
        let err = OpenAIClassifier::new(client)
            .classify(Path::new("/in/a.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::AI(_)));
    }
}
