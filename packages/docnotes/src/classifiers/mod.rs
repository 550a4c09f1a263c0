//! Local classifier implementations.
//!
//! The oracle-backed classifier lives in [`crate::ai`].

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::traits::classifier::Classifier;
use crate::types::format::{Classification, SupportedFormat};

/// Classifies by file extension alone, with no remote calls.
///
/// Used for offline runs and as the deterministic classifier in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionClassifier;

impl ExtensionClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Classifier for ExtensionClassifier {
    async fn classify(&self, path: &Path) -> Result<Classification> {
        let classification = Classification::from(SupportedFormat::from_path(path));
        debug!(?classification, "Classified {:?} by extension", path);
        Ok(classification)
    }
}
