//! The note pipeline.
//!
//! - Driver: directory enumeration and per-file state machine
//! - Prompts for the remote collaborators
//! - Writer: output path derivation and persistence

pub mod driver;
pub mod prompts;
pub mod writer;

pub use driver::{Pipeline, PipelineConfig};
pub use prompts::{
    format_classify_prompt, format_note_prompt, format_resolve_prompt, CLASSIFY_PROMPT,
    FORMAT_PROMPT, FORMAT_SYSTEM_PROMPT, NOTE_TEMPLATE, RESOLVE_REQUEST_PROMPT,
};
pub use writer::{output_path, write_document, NOTE_EXTENSION};
