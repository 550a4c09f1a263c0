//! Formatter trait: raw text to a templated note.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::FormattedDocument;

/// Turns extracted text into a structured note plus a file name.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Format the text. Empty text is still formatted.
    async fn format(&self, text: &str) -> Result<FormattedDocument>;
}

#[async_trait]
impl<T: Formatter + ?Sized> Formatter for Box<T> {
    async fn format(&self, text: &str) -> Result<FormattedDocument> {
        (**self).format(text).await
    }
}
