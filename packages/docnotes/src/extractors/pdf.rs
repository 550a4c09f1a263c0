//! PDF content extractor.
//!
//! Uses lopdf to pull text page by page.

use std::path::Path;

use async_trait::async_trait;
use lopdf::Document;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::Extractor;
use crate::types::format::SupportedFormat;

/// Extractor for PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    fn kind(&self) -> SupportedFormat {
        SupportedFormat::Pdf
    }

    async fn extract(&self, path: &Path) -> ExtractResult<String> {
        debug!("Extracting PDF: {:?}", path);

        let bytes = tokio::fs::read(path).await?;

        tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| ExtractError::Pdf(format!("Task join error: {e}")))?
    }
}

/// Extract every page's text and join the pages with newlines.
fn extract_pdf_text(bytes: &[u8]) -> ExtractResult<String> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let pages = doc.get_pages().into_keys().map(|page_num| {
        match doc.extract_text(&[page_num]) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("No text on page {}: {}", page_num, e);
                None
            }
        }
    });

    Ok(join_pages(pages))
}

/// Join per-page text with `\n`.
///
/// Pages without text contribute an empty segment so the page count and
/// order survive in the output. Trailing line breaks inside a page are
/// dropped so each page is exactly one segment boundary apart.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    pages
        .into_iter()
        .map(|page| {
            page.map(|text| text.trim_end_matches(['\r', '\n']).to_string())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build_pdf;

    #[test]
    fn test_join_pages_keeps_empty_pages_in_place() {
        let joined = join_pages(vec![
            Some("First".to_string()),
            None,
            Some("Third\n".to_string()),
            Some(String::new()),
        ]);

        let segments: Vec<&str> = joined.split('\n').collect();
        assert_eq!(segments, vec!["First", "", "Third", ""]);
    }

    #[test]
    fn test_join_pages_single_and_none() {
        assert_eq!(join_pages(vec![Some("Only".to_string())]), "Only");
        assert_eq!(join_pages(Vec::<Option<String>>::new()), "");
        assert_eq!(join_pages(vec![None, None]), "\n");
    }

    #[test]
    fn test_extract_two_page_pdf_with_blank_second_page() {
        let bytes = build_pdf(&["Hello", ""]);
        let text = extract_pdf_text(&bytes).unwrap();

        let segments: Vec<&str> = text.split('\n').collect();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].contains("Hello"));
        assert_eq!(segments[1], "");
    }

    #[test]
    fn test_extract_three_pages_blank_middle() {
        let bytes = build_pdf(&["Alpha", "", "Gamma"]);
        let text = extract_pdf_text(&bytes).unwrap();

        let segments: Vec<&str> = text.split('\n').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments[0].contains("Alpha"));
        assert_eq!(segments[1], "");
        assert!(segments[2].contains("Gamma"));
    }

    #[test]
    fn test_corrupt_pdf_is_error() {
        let err = extract_pdf_text(b"%PDF-1.5 this is not really a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = PdfExtractor::new()
            .extract(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
