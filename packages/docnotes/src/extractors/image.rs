//! Image OCR extractor.
//!
//! Shells out to the `tesseract` executable and returns whatever it prints.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::Extractor;
use crate::types::format::SupportedFormat;

/// Default OCR executable, resolved through `PATH`.
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Default OCR language pack.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// OCR extractor for `.jpg` / `.png` files.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    command: PathBuf,
    language: String,
}

impl ImageExtractor {
    /// Create an extractor using `tesseract` from `PATH` and English.
    pub fn new() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_TESSERACT_CMD),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
        }
    }

    /// Use a specific tesseract binary.
    pub fn with_command(mut self, command: impl Into<PathBuf>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the OCR language (e.g. `eng`, `deu`, `eng+fra`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for ImageExtractor {
    fn kind(&self) -> SupportedFormat {
        SupportedFormat::Image
    }

    async fn extract(&self, path: &Path) -> ExtractResult<String> {
        debug!(command = ?self.command, lang = %self.language, "Running OCR on {:?}", path);

        // `tesseract <image> stdout -l <lang>` prints the recognized text.
        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| {
                ExtractError::Ocr(format!("failed to run {}: {}", self.command.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!(
                "{} exited with {}: {}",
                self.command.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
