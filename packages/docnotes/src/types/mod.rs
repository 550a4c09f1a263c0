//! Data types shared across the pipeline.

pub mod document;
pub mod format;
pub mod report;
