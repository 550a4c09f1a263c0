use anyhow::{Context, Result};
use dotenvy::dotenv;
use openai_client::OpenAIClient;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::DEFAULT_MODEL;
use crate::extractors::{
    ExtractorSettings, DEFAULT_OCR_LANGUAGE, DEFAULT_TESSERACT_CMD, DEFAULT_TRANSCRIBE_MODEL,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub transcribe_model: String,
    pub tesseract_cmd: PathBuf,
    pub ocr_language: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let request_timeout = lookup("DOCNOTES_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .context("DOCNOTES_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            openai_api_key: lookup("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_base_url: lookup("OPENAI_BASE_URL"),
            model: lookup("DOCNOTES_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            transcribe_model: lookup("DOCNOTES_TRANSCRIBE_MODEL")
                .unwrap_or_else(|| DEFAULT_TRANSCRIBE_MODEL.to_string()),
            tesseract_cmd: lookup("TESSERACT_CMD")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TESSERACT_CMD)),
            ocr_language: lookup("DOCNOTES_OCR_LANG")
                .unwrap_or_else(|| DEFAULT_OCR_LANGUAGE.to_string()),
            request_timeout,
        })
    }

    /// Build the single OpenAI client shared by every collaborator.
    pub fn openai_client(&self) -> Result<OpenAIClient> {
        let mut client = OpenAIClient::new(self.openai_api_key.clone());
        if let Some(url) = &self.openai_base_url {
            client = client.with_base_url(url.clone());
        }
        if let Some(timeout) = self.request_timeout {
            client = client
                .with_timeout(timeout)
                .context("Failed to configure request timeout")?;
        }
        Ok(client)
    }

    /// Settings for the built-in extractors.
    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            tesseract_cmd: self.tesseract_cmd.clone(),
            ocr_language: self.ocr_language.clone(),
            transcribe_model: self.transcribe_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.transcribe_model, "gpt-4o-mini-transcribe");
        assert_eq!(config.tesseract_cmd, PathBuf::from("tesseract"));
        assert_eq!(config.ocr_language, "eng");
        assert!(config.openai_base_url.is_none());
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
            ("DOCNOTES_MODEL", "gpt-4o"),
            ("TESSERACT_CMD", "/opt/homebrew/bin/tesseract"),
            ("DOCNOTES_OCR_LANG", "deu"),
            ("DOCNOTES_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));

        let client = config.openai_client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");

        let settings = config.extractor_settings();
        assert_eq!(settings.tesseract_cmd, PathBuf::from("/opt/homebrew/bin/tesseract"));
        assert_eq!(settings.ocr_language, "deu");
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DOCNOTES_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DOCNOTES_TIMEOUT_SECS"));
    }
}
