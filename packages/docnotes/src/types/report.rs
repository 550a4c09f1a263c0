//! Per-file outcomes and run summaries.

use std::path::{Path, PathBuf};

use super::format::SupportedFormat;

/// Why a directory entry was not processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension outside the allow-list (`None` when the file has none)
    UnsupportedExtension(Option<String>),

    /// Subdirectories are never descended into
    Directory,
}

/// Terminal state of one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Not eligible for processing
    Skipped(SkipReason),

    /// The classifier selected no capability
    Unclassified,

    /// A note was written
    Written {
        format: SupportedFormat,
        output: PathBuf,
    },
}

/// A file whose extraction, formatting or write failed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Outcomes in processing order
    pub outcomes: Vec<(PathBuf, FileOutcome)>,

    /// Files that failed, in processing order
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: FileOutcome) {
        self.outcomes.push((path.into(), outcome));
    }

    pub fn record_failure(&mut self, path: impl Into<PathBuf>, error: impl ToString) {
        self.failures.push(FileFailure {
            path: path.into(),
            error: error.to_string(),
        });
    }

    /// Paths of every note written.
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                FileOutcome::Written { output, .. } => Some(output.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn written_count(&self) -> usize {
        self.written().len()
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_)))
    }

    pub fn unclassified_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unclassified))
    }

    /// Outcome recorded for `path`, if any.
    pub fn outcome_for(&self, path: &Path) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }

    /// Check if every file either produced a note or was skipped cleanly.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new();
        report.record("/in/a.pdf", FileOutcome::Written {
            format: SupportedFormat::Pdf,
            output: PathBuf::from("/in/hello.md"),
        });
        report.record(
            "/in/b.txt",
            FileOutcome::Skipped(SkipReason::UnsupportedExtension(Some("txt".into()))),
        );
        report.record("/in/c.png", FileOutcome::Unclassified);
        report.record_failure("/in/d.mp3", "network down");

        assert_eq!(report.written_count(), 1);
        assert_eq!(report.written(), vec![Path::new("/in/hello.md")]);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.unclassified_count(), 1);
        assert_eq!(report.outcome_for(Path::new("/in/c.png")), Some(&FileOutcome::Unclassified));
        assert!(!report.is_success());
    }
}
