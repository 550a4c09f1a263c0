//! Supported input formats and classification outcomes.

use std::fmt;
use std::path::Path;

/// Closed set of input formats, each bound to one extraction capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedFormat {
    /// PDF documents (`.pdf`)
    Pdf,

    /// Raster images run through OCR (`.jpg`, `.png`)
    Image,

    /// Audio recordings sent for transcription (`.mp3`)
    Audio,
}

impl SupportedFormat {
    /// Every format, in capability-catalog order.
    pub const ALL: [SupportedFormat; 3] = [Self::Pdf, Self::Image, Self::Audio];

    /// Extensions accepted by the driver, lower-case.
    pub const EXTENSIONS: [&'static str; 4] = ["pdf", "jpg", "png", "mp3"];

    /// Map a file extension (case-insensitive) to its format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "png" => Some(Self::Image),
            "mp3" => Some(Self::Audio),
            _ => None,
        }
    }

    /// Map a path's extension to its format.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Name of the capability the classification oracle selects.
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Pdf => "parse_pdf",
            Self::Image => "parse_image",
            Self::Audio => "parse_mp3",
        }
    }

    /// Capability description shown to the oracle.
    pub fn tool_description(self) -> &'static str {
        match self {
            Self::Pdf => "Extracts text from a PDF document, page by page",
            Self::Image => "Extracts text from an image using OCR",
            Self::Audio => "Transcribes speech from an MP3 audio file",
        }
    }

    /// Inverse of [`tool_name`](Self::tool_name).
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.tool_name() == name)
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Audio => "audio",
        };
        f.write_str(label)
    }
}

/// Outcome of classifying one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// An extraction capability was selected
    Classified(SupportedFormat),

    /// No capability applies; the file is skipped
    Unclassified,
}

impl Classification {
    /// The selected format, if any.
    pub fn format(self) -> Option<SupportedFormat> {
        match self {
            Self::Classified(format) => Some(format),
            Self::Unclassified => None,
        }
    }
}

impl From<Option<SupportedFormat>> for Classification {
    fn from(format: Option<SupportedFormat>) -> Self {
        format.map_or(Self::Unclassified, Self::Classified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping_is_case_insensitive() {
        assert_eq!(SupportedFormat::from_extension("PDF"), Some(SupportedFormat::Pdf));
        assert_eq!(SupportedFormat::from_extension("Jpg"), Some(SupportedFormat::Image));
        assert_eq!(SupportedFormat::from_extension("png"), Some(SupportedFormat::Image));
        assert_eq!(SupportedFormat::from_extension("MP3"), Some(SupportedFormat::Audio));
    }

    #[test]
    fn test_allow_list_is_closed() {
        for ext in ["txt", "jpeg", "wav", "docx", ""] {
            assert_eq!(SupportedFormat::from_extension(ext), None, "{ext} must be rejected");
        }
        for ext in SupportedFormat::EXTENSIONS {
            assert!(SupportedFormat::from_extension(ext).is_some());
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            SupportedFormat::from_path(Path::new("/tmp/notes/Scan.PNG")),
            Some(SupportedFormat::Image)
        );
        assert_eq!(SupportedFormat::from_path(Path::new("/tmp/notes/README")), None);
        assert_eq!(SupportedFormat::from_path(Path::new("archive.tar.gz")), None);
    }

    #[test]
    fn test_tool_names_round_trip() {
        for format in SupportedFormat::ALL {
            assert_eq!(SupportedFormat::from_tool_name(format.tool_name()), Some(format));
        }
        assert_eq!(SupportedFormat::from_tool_name("parse_docx"), None);
    }

    #[test]
    fn test_classification_from_option() {
        assert_eq!(
            Classification::from(Some(SupportedFormat::Audio)),
            Classification::Classified(SupportedFormat::Audio)
        );
        assert_eq!(Classification::from(None), Classification::Unclassified);
        assert_eq!(Classification::Unclassified.format(), None);
    }
}
