//! Request resolver trait: free-form instruction to a run request.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::PipelineRequest;

/// Resolves a natural-language instruction once, at the start of a run.
#[async_trait]
pub trait RequestResolver: Send + Sync {
    async fn resolve(&self, instruction: &str) -> Result<PipelineRequest>;
}
