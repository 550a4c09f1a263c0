//! Pure OpenAI REST API client
//!
//! A clean, minimal client for the OpenAI API with no domain-specific logic.
//! Supports chat completions (including JSON mode), function calling and
//! audio transcription.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! let response = client.chat_completion(
//!     ChatRequest::new("gpt-4o-mini")
//!         .message(Message::user("Hello!"))
//!         .json_object(),
//! ).await?;
//!
//! let transcript = client
//!     .create_transcription(Path::new("memo.mp3"), "gpt-4o-mini-transcribe")
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod tool;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use tool::{ToolCall, ToolDefinition};
pub use types::*;

use std::path::Path;
use std::time::Duration;

use reqwest::{multipart, Client};
use serde::Serialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Apply a per-request timeout. Without one, requests wait indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAIError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get a response.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let chat_response: types::ChatResponseRaw =
            self.post_json("chat/completions", &request).await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAIError::EmptyResponse(request.model.clone()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Function calling (tool use).
    ///
    /// Send messages with tool definitions and get tool calls or content back.
    pub async fn function_calling(&self, request: FunctionRequest) -> Result<FunctionResponse> {
        let chat_response: types::ChatResponseRaw =
            self.post_json("chat/completions", &request).await?;

        let message = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| OpenAIError::EmptyResponse(request.model.clone()))?;

        debug!(
            model = %request.model,
            tool_calls = message.tool_calls.len(),
            "OpenAI function calling"
        );

        Ok(FunctionResponse {
            content: message.content,
            tool_calls: message.tool_calls,
        })
    }

    /// Transcribe an audio file.
    ///
    /// Uploads the file as multipart form data and returns the transcript text.
    pub async fn create_transcription(&self, path: &Path, model: &str) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();

        debug!(file = %file_name, bytes = bytes.len(), model, "Uploading audio for transcription");

        let form = multipart::Form::new()
            .text("model", model.to_string())
            .text("response_format", "json")
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let endpoint = "audio/transcriptions";
        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|source| network_error(endpoint, source))?;
        let response = check_status(endpoint, response).await?;

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        Ok(transcription.text)
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| network_error(endpoint, source))?;
        let response = check_status(endpoint, response).await?;

        response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))
    }
}

fn network_error(endpoint: &str, source: reqwest::Error) -> OpenAIError {
    warn!(error = %source, endpoint, "OpenAI request failed");
    OpenAIError::Network {
        endpoint: endpoint.to_string(),
        source,
    }
}

/// Turn a non-2xx response into [`OpenAIError::Api`] carrying the body text.
async fn check_status(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!(status = %status, error = %message, endpoint, "OpenAI API error");
    Err(OpenAIError::Api {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}
