//! Extractor trait: turn a file into plain text.

use std::path::Path;

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::format::SupportedFormat;

/// A capability that reads one kind of file and returns its text.
///
/// Errors are returned as-is; isolating them to a single file is the
/// driver's job.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// The format this extractor handles.
    fn kind(&self) -> SupportedFormat;

    /// Extract text. Empty output is a valid result.
    async fn extract(&self, path: &Path) -> ExtractResult<String>;
}
