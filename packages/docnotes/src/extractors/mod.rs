//! Built-in extractors and the format registry.

mod audio;
mod image;
mod pdf;
mod registry;

pub use audio::{AudioExtractor, DEFAULT_TRANSCRIBE_MODEL};
pub use image::{ImageExtractor, DEFAULT_OCR_LANGUAGE, DEFAULT_TESSERACT_CMD};
pub use pdf::{join_pages, PdfExtractor};
pub use registry::{ExtractorRegistry, ExtractorSettings};
