//! Pipeline driver: enumerate → check extension → classify → extract → format → write.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{PipelineError, Result};
use crate::extractors::ExtractorRegistry;
use crate::pipeline::writer::{output_path, write_document};
use crate::traits::{classifier::Classifier, formatter::Formatter};
use crate::types::{
    document::check_template,
    format::{Classification, SupportedFormat},
    report::{FileOutcome, RunReport, SkipReason},
};

/// Run-level settings for the driver.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Write notes here instead of next to each input
    pub output_dir: Option<PathBuf>,

    /// Abort the run on the first file error instead of recording it
    pub fail_fast: bool,

    /// Reject notes whose body deviates from the template
    pub strict_template: bool,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Stop at the first failing file.
    pub fn fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Treat template deviations as errors.
    pub fn strict_template(mut self) -> Self {
        self.strict_template = true;
        self
    }
}

/// Processes every file of one directory, sequentially.
pub struct Pipeline<C: Classifier, F: Formatter> {
    classifier: C,
    registry: ExtractorRegistry,
    formatter: F,
    config: PipelineConfig,
}

impl<C: Classifier, F: Formatter> Pipeline<C, F> {
    /// Create a pipeline with default settings.
    pub fn new(classifier: C, registry: ExtractorRegistry, formatter: F) -> Self {
        Self {
            classifier,
            registry,
            formatter,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the run settings.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every entry of `input_dir` (non-recursive) in file-name order.
    ///
    /// Per-file failures are recorded in the report and the run continues,
    /// unless `fail_fast` is set.
    pub async fn run(&self, input_dir: &Path) -> Result<RunReport> {
        let entries = list_entries(input_dir).await?;
        info!(dir = ?input_dir, entries = entries.len(), "Starting run");

        let mut report = RunReport::new();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for path in entries {
            if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
                debug!("Skipping directory {:?}", path);
                report.record(path, FileOutcome::Skipped(SkipReason::Directory));
                continue;
            }

            match self.process_file(&path).await {
                Ok(outcome) => {
                    if let FileOutcome::Written { output, .. } = &outcome {
                        if !written.insert(output.clone()) {
                            warn!(output = ?output, "Note name reused in this run, earlier note overwritten");
                        }
                    }
                    report.record(path, outcome);
                }
                Err(e) if self.config.fail_fast => {
                    error!(path = ?path, error = %e, "Aborting run");
                    return Err(e);
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "Failed to process file, continuing");
                    report.record_failure(path, e);
                }
            }
        }

        info!(
            written = report.written_count(),
            skipped = report.skipped_count(),
            unclassified = report.unclassified_count(),
            failed = report.failures.len(),
            "Run complete"
        );

        Ok(report)
    }

    /// Run one file through the whole pipeline.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        if !extension
            .as_deref()
            .is_some_and(|ext| SupportedFormat::EXTENSIONS.contains(&ext))
        {
            info!("File type not supported, skipping {:?}", path);
            return Ok(FileOutcome::Skipped(SkipReason::UnsupportedExtension(extension)));
        }

        info!("Processing {:?}", path);

        let format = match self.classifier.classify(path).await? {
            Classification::Classified(format) => format,
            Classification::Unclassified => {
                info!("No tool chosen for {:?}, skipping", path);
                return Ok(FileOutcome::Unclassified);
            }
        };

        let text = self.registry.extract(format, path).await?;
        debug!(%format, chars = text.len(), "Extracted {:?}", path);

        let document = self.formatter.format(&text).await?;

        if let Err(issue) = check_template(&document.markdown) {
            if self.config.strict_template {
                return Err(PipelineError::ContractViolation(format!(
                    "note for {}: {}",
                    path.display(),
                    issue
                )));
            }
            warn!(path = ?path, %issue, "Note does not follow the template, keeping it");
        }

        let output = output_path(path, self.config.output_dir.as_deref(), &document.filename);
        write_document(&document, &output).await?;
        info!("Saved {:?}", output);

        Ok(FileOutcome::Written { format, output })
    }
}

/// Directory entries sorted by file name.
async fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_err = |source: std::io::Error| PipelineError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(read_dir_err)? {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
