//! Testing utilities including mock implementations.
//!
//! These are useful for exercising the pipeline without OCR engines,
//! network calls or real model responses.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::{ExtractError, ExtractResult, PipelineError, Result};
use crate::traits::{
    classifier::Classifier, extractor::Extractor, formatter::Formatter, resolver::RequestResolver,
};
use crate::types::{
    document::{normalize_filename, parse_formatted_document, FormattedDocument, PipelineRequest},
    format::{Classification, SupportedFormat},
};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// Classifier
// =============================================================================

/// A mock classifier.
///
/// Answers per file name when configured, otherwise falls back to the
/// extension (or to a fixed default set with [`with_default`](Self::with_default)).
#[derive(Clone, Default)]
pub struct MockClassifier {
    by_name: Arc<RwLock<HashMap<String, Classification>>>,
    default: Option<Classification>,
    calls: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `classification` for files called `name`.
    pub fn with_classification(self, name: impl Into<String>, classification: Classification) -> Self {
        self.by_name
            .write()
            .unwrap()
            .insert(name.into(), classification);
        self
    }

    /// Answer `classification` for every file without a per-name entry.
    pub fn with_default(mut self, classification: Classification) -> Self {
        self.default = Some(classification);
        self
    }

    /// Paths classified so far.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, path: &Path) -> Result<Classification> {
        self.calls.write().unwrap().push(path.to_path_buf());

        if let Some(classification) = self.by_name.read().unwrap().get(&file_name(path)) {
            return Ok(*classification);
        }

        Ok(self
            .default
            .unwrap_or_else(|| Classification::from(SupportedFormat::from_path(path))))
    }
}

// =============================================================================
// Extractor
// =============================================================================

/// A mock extractor for one format.
///
/// Clones share state, so a test can keep a handle after boxing one into
/// an [`ExtractorRegistry`](crate::extractors::ExtractorRegistry).
#[derive(Clone)]
pub struct MockExtractor {
    kind: SupportedFormat,
    texts: Arc<RwLock<HashMap<String, String>>>,
    default_text: Option<String>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockExtractor {
    pub fn new(kind: SupportedFormat) -> Self {
        Self {
            kind,
            texts: Arc::default(),
            default_text: None,
            failures: Arc::default(),
            calls: Arc::default(),
        }
    }

    /// Text returned for files without a per-name entry.
    pub fn with_default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }

    /// Return `text` for files called `name`.
    pub fn with_text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_text(name, text);
        self
    }

    pub fn set_text(&self, name: impl Into<String>, text: impl Into<String>) {
        self.texts.write().unwrap().insert(name.into(), text.into());
    }

    /// Fail with an I/O error for files called `name`.
    pub fn fail_on(&self, name: impl Into<String>) {
        self.failures.write().unwrap().insert(name.into());
    }

    /// Paths extracted so far.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn kind(&self) -> SupportedFormat {
        self.kind
    }

    async fn extract(&self, path: &Path) -> ExtractResult<String> {
        self.calls.write().unwrap().push(path.to_path_buf());
        let name = file_name(path);

        if self.failures.read().unwrap().contains(&name) {
            return Err(ExtractError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("mock failure for {name}"),
            )));
        }

        Ok(self
            .texts
            .read()
            .unwrap()
            .get(&name)
            .cloned()
            .or_else(|| self.default_text.clone())
            .unwrap_or_else(|| format!("{} text from {}", self.kind, name)))
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// A mock formatter.
///
/// By default it names the note after the first words of the text and fills
/// the template with the text as the key points. A raw response, when set,
/// goes through the same JSON contract check as the real formatter.
#[derive(Clone, Default)]
pub struct MockFormatter {
    raw_response: Option<String>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call with this raw service payload.
    pub fn with_raw_response(mut self, payload: impl Into<String>) -> Self {
        self.raw_response = Some(payload.into());
        self
    }

    /// Texts formatted so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The document produced for `text` when no raw response is set.
    pub fn default_document(text: &str) -> FormattedDocument {
        let name = text.split_whitespace().take(4).collect::<Vec<_>>().join(" ");
        let filename = normalize_filename(&name);
        let markdown = format!(
            "# {filename}\n## Date: unknown\n\n### Key Points: {}\n\n### Action Items: none\n\n### Next Steps: none\n",
            text.trim()
        );
        FormattedDocument::new(&filename, markdown)
    }
}

#[async_trait]
impl Formatter for MockFormatter {
    async fn format(&self, text: &str) -> Result<FormattedDocument> {
        self.calls.write().unwrap().push(text.to_string());

        match &self.raw_response {
            Some(payload) => parse_formatted_document(payload),
            None => Ok(Self::default_document(text)),
        }
    }
}

// =============================================================================
// Request resolver
// =============================================================================

/// A mock request resolver answering a fixed directory.
#[derive(Clone, Default)]
pub struct MockResolver {
    input_dir: Option<PathBuf>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockResolver {
    /// Resolve every instruction to `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: Some(input_dir.into()),
            calls: Arc::default(),
        }
    }

    /// A resolver that never finds a directory.
    pub fn unresolvable() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl RequestResolver for MockResolver {
    async fn resolve(&self, instruction: &str) -> Result<PipelineRequest> {
        self.calls.write().unwrap().push(instruction.to_string());

        self.input_dir
            .clone()
            .map(PipelineRequest::new)
            .ok_or_else(|| PipelineError::InvalidRequest(format!("no directory in '{instruction}'")))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Build a PDF with one page per entry; an empty entry yields a page with no text.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            vec![]
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::check_template;

    #[test]
    fn test_default_document_follows_template() {
        let doc = MockFormatter::default_document("Call the plumber about the leak");

        assert_eq!(doc.filename, "call-the-plumber-about");
        assert_eq!(check_template(&doc.markdown), Ok(()));
    }

    #[test]
    fn test_build_pdf_page_count() {
        let bytes = build_pdf(&["one", "", "three"]);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_resolver() {
        let resolver = MockResolver::new("/in");
        assert_eq!(
            resolver.resolve("do the inbox").await.unwrap(),
            PipelineRequest::new("/in")
        );
        assert_eq!(resolver.calls(), vec!["do the inbox".to_string()]);

        let err = MockResolver::unresolvable().resolve("?").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest(_)));
    }
}
