//! Classifier trait: pick the extraction capability for a file.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::format::Classification;

/// Decides which extractor applies to a file.
///
/// Implementations may ignore the file's extension entirely; the driver has
/// already filtered out extensions it cannot handle.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a single file.
    async fn classify(&self, path: &Path) -> Result<Classification>;
}

#[async_trait]
impl<T: Classifier + ?Sized> Classifier for Box<T> {
    async fn classify(&self, path: &Path) -> Result<Classification> {
        (**self).classify(path).await
    }
}
