//! Document-to-Note Pipeline
//!
//! Turns a directory of PDFs, images and voice memos into structured
//! markdown notes.
//!
//! For each directory entry the driver checks the extension against a closed
//! allow-list, asks a classifier which extraction capability applies, pulls
//! the text out, has a formatter fill the note template, and writes the note
//! next to its input (or into an explicit output directory).
//!
//! # Usage
//!
//! ```rust,ignore
//! use docnotes::{ExtractorRegistry, ExtractorSettings, Pipeline, PipelineRequest};
//! use docnotes::ai::{OpenAIClassifier, OpenAIFormatter};
//! use openai_client::OpenAIClient;
//!
//! let client = OpenAIClient::from_env()?;
//! let pipeline = Pipeline::new(
//!     OpenAIClassifier::new(client.clone()),
//!     ExtractorRegistry::with_defaults(client.clone(), &ExtractorSettings::default()),
//!     OpenAIFormatter::new(client),
//! );
//!
//! let report = pipeline.run(PipelineRequest::new("./inbox").input_dir()).await?;
//! println!("{} notes written", report.written_count());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (Classifier, Extractor, Formatter, RequestResolver)
//! - [`types`] - Formats, documents, run reports
//! - [`extractors`] - PDF, OCR and transcription extractors plus the registry
//! - [`classifiers`] - Local, extension-based classifier
//! - [`ai`] - OpenAI-backed classifier, formatter and resolver
//! - [`pipeline`] - Driver, prompts and note writer
//! - [`config`] - Environment configuration for the binary
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod classifiers;
pub mod config;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, PipelineError};
pub use traits::{
    classifier::Classifier, extractor::Extractor, formatter::Formatter,
    resolver::RequestResolver,
};
pub use types::{
    document::{
        check_template, normalize_filename, parse_formatted_document, parse_pipeline_request,
        FormattedDocument, PipelineRequest, TemplateIssue,
    },
    format::{Classification, SupportedFormat},
    report::{FileFailure, FileOutcome, RunReport, SkipReason},
};

pub use classifiers::ExtensionClassifier;
pub use config::Config;
pub use extractors::{AudioExtractor, ExtractorRegistry, ExtractorSettings, ImageExtractor, PdfExtractor};
pub use pipeline::{Pipeline, PipelineConfig};

// Re-export testing utilities
pub use testing::{MockClassifier, MockExtractor, MockFormatter, MockResolver};
