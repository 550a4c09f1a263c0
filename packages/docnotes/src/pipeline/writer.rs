//! Note persistence.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::types::document::FormattedDocument;

/// Extension of every written note.
pub const NOTE_EXTENSION: &str = "md";

/// Where the note for `input` goes.
///
/// `output_dir` wins when set; otherwise the note sits next to its input.
pub fn output_path(input: &Path, output_dir: Option<&Path>, filename: &str) -> PathBuf {
    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new("."));
    dir.join(filename).with_extension(NOTE_EXTENSION)
}

/// Write the note body to `path`, replacing any existing file.
pub async fn write_document(document: &FormattedDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| PipelineError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, document.markdown.as_bytes())
        .await
        .map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(bytes = document.markdown.len(), "Wrote {:?}", path);
    Ok(())
}
