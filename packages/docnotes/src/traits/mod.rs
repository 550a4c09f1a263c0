//! Core trait abstractions for the note pipeline.
//!
//! Each remote or engine-backed collaborator sits behind one of these traits
//! so the driver can run against deterministic implementations in tests.

pub mod classifier;
pub mod extractor;
pub mod formatter;
pub mod resolver;
