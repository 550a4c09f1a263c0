//! Audio transcription extractor.

use std::path::Path;

use async_trait::async_trait;
use openai_client::OpenAIClient;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::Extractor;
use crate::types::format::SupportedFormat;

/// Default transcription model.
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "gpt-4o-mini-transcribe";

/// Sends `.mp3` files to the OpenAI transcription endpoint.
#[derive(Clone)]
pub struct AudioExtractor {
    client: OpenAIClient,
    model: String,
}

impl AudioExtractor {
    /// Create an extractor on the shared client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
        }
    }

    /// Set the transcription model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Extractor for AudioExtractor {
    fn kind(&self) -> SupportedFormat {
        SupportedFormat::Audio
    }

    async fn extract(&self, path: &Path) -> ExtractResult<String> {
        debug!(model = %self.model, "Transcribing {:?}", path);

        self.client
            .create_transcription(path, &self.model)
            .await
            .map_err(|e| ExtractError::Transcription(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_override() {
        let extractor = AudioExtractor::new(OpenAIClient::new("sk-test"));
        assert_eq!(extractor.model(), DEFAULT_TRANSCRIBE_MODEL);

        let extractor = extractor.with_model("whisper-1");
        assert_eq!(extractor.model(), "whisper-1");
        assert_eq!(extractor.kind(), SupportedFormat::Audio);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_transcription_error() {
        let extractor = AudioExtractor::new(
            OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:9"),
        );
        let err = extractor
            .extract(Path::new("/definitely/not/here.mp3"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Transcription(_)));
    }
}
