//! Extractor registry: one extractor per supported format.

use std::path::{Path, PathBuf};

use openai_client::OpenAIClient;
use tracing::debug;

use super::{AudioExtractor, ImageExtractor, PdfExtractor};
use super::{DEFAULT_OCR_LANGUAGE, DEFAULT_TESSERACT_CMD, DEFAULT_TRANSCRIBE_MODEL};
use crate::error::{ExtractResult, PipelineError, Result};
use crate::traits::extractor::Extractor;
use crate::types::format::SupportedFormat;

/// Engine settings for the built-in extractors.
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    pub tesseract_cmd: PathBuf,
    pub ocr_language: String,
    pub transcribe_model: String,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from(DEFAULT_TESSERACT_CMD),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            transcribe_model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
        }
    }
}

/// Maps each [`SupportedFormat`] to exactly one extractor.
pub struct ExtractorRegistry {
    pdf: Box<dyn Extractor>,
    image: Box<dyn Extractor>,
    audio: Box<dyn Extractor>,
}

impl ExtractorRegistry {
    /// Build a registry from explicit extractors.
    ///
    /// Fails with [`PipelineError::MisplacedExtractor`] if an extractor's
    /// [`kind`](Extractor::kind) does not match its slot.
    pub fn new(
        pdf: Box<dyn Extractor>,
        image: Box<dyn Extractor>,
        audio: Box<dyn Extractor>,
    ) -> Result<Self> {
        check_slot(SupportedFormat::Pdf, pdf.as_ref())?;
        check_slot(SupportedFormat::Image, image.as_ref())?;
        check_slot(SupportedFormat::Audio, audio.as_ref())?;
        Ok(Self { pdf, image, audio })
    }

    /// Build the standard registry: lopdf, tesseract and OpenAI transcription.
    pub fn with_defaults(client: OpenAIClient, settings: &ExtractorSettings) -> Self {
        Self {
            pdf: Box::new(PdfExtractor::new()),
            image: Box::new(
                ImageExtractor::new()
                    .with_command(&settings.tesseract_cmd)
                    .with_language(&settings.ocr_language),
            ),
            audio: Box::new(AudioExtractor::new(client).with_model(&settings.transcribe_model)),
        }
    }

    /// The extractor bound to `format`.
    pub fn get(&self, format: SupportedFormat) -> &dyn Extractor {
        match format {
            SupportedFormat::Pdf => self.pdf.as_ref(),
            SupportedFormat::Image => self.image.as_ref(),
            SupportedFormat::Audio => self.audio.as_ref(),
        }
    }

    /// Extract text from `path` with the extractor for `format`.
    pub async fn extract(&self, format: SupportedFormat, path: &Path) -> ExtractResult<String> {
        debug!(%format, "Dispatching {:?}", path);
        self.get(format).extract(path).await
    }
}

fn check_slot(slot: SupportedFormat, extractor: &dyn Extractor) -> Result<()> {
    let found = extractor.kind();
    if found != slot {
        return Err(PipelineError::MisplacedExtractor { slot, found });
    }
    Ok(())
}
