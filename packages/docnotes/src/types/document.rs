//! Run requests and formatted notes.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PipelineError, Result};

/// Fallback name when the generation service gives nothing usable.
pub const FALLBACK_FILENAME: &str = "untitled-note";

/// A resolved run: the directory whose files are turned into notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub input_dir: PathBuf,
}

impl PipelineRequest {
    /// Create a request for an explicit directory.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    /// The directory to enumerate.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }
}

/// Parse the resolver's `{"input_dir": "..."}` answer.
///
/// Extra keys are ignored; a missing, non-string or blank `input_dir` is an error.
pub fn parse_pipeline_request(raw: &str) -> Result<PipelineRequest> {
    #[derive(Deserialize)]
    struct RawRequest {
        input_dir: String,
    }

    let parsed: RawRequest = serde_json::from_str(openai_client::strip_code_blocks(raw))
        .map_err(|e| PipelineError::InvalidRequest(format!("{e}: {raw}")))?;

    let dir = parsed.input_dir.trim();
    if dir.is_empty() {
        return Err(PipelineError::InvalidRequest(
            "no input directory in request".to_string(),
        ));
    }

    Ok(PipelineRequest::new(dir))
}

/// A structured note ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDocument {
    /// Kebab-case file stem, without extension
    pub filename: String,

    /// Filled-in note template
    pub markdown: String,
}

impl FormattedDocument {
    /// Create a document, normalizing the file name to a safe slug.
    pub fn new(filename: &str, markdown: impl Into<String>) -> Self {
        Self {
            filename: normalize_filename(filename),
            markdown: markdown.into(),
        }
    }
}

/// Parse the generation service's JSON answer.
///
/// The payload must be an object with exactly the string keys `filename` and
/// `markdown`. Anything else is a contract violation.
pub fn parse_formatted_document(raw: &str) -> Result<FormattedDocument> {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RawDocument {
        filename: String,
        markdown: String,
    }

    let value: Value = serde_json::from_str(openai_client::strip_code_blocks(raw))
        .map_err(|e| PipelineError::ContractViolation(e.to_string()))?;

    // serde would also fill a struct from a positional array
    if !value.is_object() {
        return Err(PipelineError::ContractViolation(format!(
            "expected a JSON object, got: {value}"
        )));
    }

    let parsed: RawDocument = serde_json::from_value(value)
        .map_err(|e| PipelineError::ContractViolation(e.to_string()))?;

    Ok(FormattedDocument::new(&parsed.filename, parsed.markdown))
}

/// Reduce a suggested name to lower-case words joined by single dashes.
///
/// Letters and digits of any script are kept. Path separators, dots and any
/// other punctuation become word breaks, so the result can never escape the
/// output directory. A trailing `.md` is dropped.
pub fn normalize_filename(raw: &str) -> String {
    let trimmed = raw.trim();
    let stem = if trimmed.to_ascii_lowercase().ends_with(".md") {
        &trimmed[..trimmed.len() - 3]
    } else {
        trimmed
    };

    let mut slug = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for c in stem.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        slug
    }
}

/// One heading of the note template.
#[derive(Debug, Clone, Copy)]
struct Section {
    name: &'static str,
    prefix: &'static str,
}

const SECTIONS: [Section; 5] = [
    Section { name: "Title", prefix: "# " },
    Section { name: "Date", prefix: "## date" },
    Section { name: "Key Points", prefix: "### key points" },
    Section { name: "Action Items", prefix: "### action items" },
    Section { name: "Next Steps", prefix: "### next steps" },
];

impl Section {
    fn matches(&self, heading: &str) -> bool {
        heading.to_ascii_lowercase().starts_with(self.prefix)
    }
}

/// Ways a note body can deviate from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateIssue {
    /// A template section is absent
    MissingSection(&'static str),

    /// A heading that is not part of the template
    ExtraSection(String),
}

impl std::fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSection(name) => write!(f, "missing section '{name}'"),
            Self::ExtraSection(heading) => write!(f, "unexpected section '{heading}'"),
        }
    }
}

/// Check that `markdown` has the five template headings, in order, and no others.
pub fn check_template(markdown: &str) -> std::result::Result<(), TemplateIssue> {
    let mut in_fence = false;
    let headings: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| {
            if line.starts_with("```") {
                in_fence = !in_fence;
                return false;
            }
            !in_fence && line.starts_with('#')
        })
        .collect();

    let mut remaining = headings.iter().peekable();
    for (idx, section) in SECTIONS.iter().enumerate() {
        match remaining.peek() {
            Some(heading) if section.matches(heading) => {
                remaining.next();
            }
            Some(heading) if SECTIONS[idx + 1..].iter().any(|s| s.matches(heading)) => {
                return Err(TemplateIssue::MissingSection(section.name));
            }
            Some(heading) => return Err(TemplateIssue::ExtraSection(heading.to_string())),
            None => return Err(TemplateIssue::MissingSection(section.name)),
        }
    }

    match remaining.next() {
        Some(extra) => Err(TemplateIssue::ExtraSection(extra.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFORMING: &str = "# Plumbing Visit\n## Date: 2024-05-02\n\n### Key Points: Leak under sink\n\n### Action Items: Buy washer\n\n### Next Steps: Call back Friday\n";

    #[test]
    fn test_parse_conforming_payload() {
        let doc = parse_formatted_document(
            r##"{"filename": "plumbing-visit", "markdown": "# Plumbing Visit"}"##,
        )
        .unwrap();

        assert_eq!(doc.filename, "plumbing-visit");
        assert_eq!(doc.markdown, "# Plumbing Visit");
    }

    #[test]
    fn test_parse_rejects_extra_key() {
        let err = parse_formatted_document(
            r#"{"filename": "a", "markdown": "b", "summary": "c"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::ContractViolation(_)));
    }

    #[test]
    fn test_parse_rejects_missing_key_and_wrong_types() {
        for payload in [
            r#"{"filename": "only-name"}"#,
            r#"{"filename": 7, "markdown": "b"}"#,
            r#"["filename", "markdown"]"#,
            r##"["my-note", "# body"]"##,
            r#""my-note""#,
            "null",
            "not json at all",
        ] {
            let err = parse_formatted_document(payload).unwrap_err();
            assert!(
                matches!(err, PipelineError::ContractViolation(_)),
                "{payload} should violate the contract"
            );
        }
    }

    #[test]
    fn test_parse_tolerates_code_fence() {
        let doc = parse_formatted_document("```json\n{\"filename\": \"x\", \"markdown\": \"y\"}\n```")
            .unwrap();
        assert_eq!(doc.filename, "x");
    }

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("meeting-notes-q3"), "meeting-notes-q3");
        assert_eq!(normalize_filename("Meeting Notes Q3.md"), "meeting-notes-q3");
        assert_eq!(normalize_filename("  snake_case__name "), "snake-case-name");
        assert_eq!(normalize_filename("../../etc/passwd"), "etc-passwd");
        assert_eq!(normalize_filename("Café—Menu"), "café-menu");
        assert_eq!(normalize_filename("a\\b:c"), "a-b-c");
        assert_eq!(normalize_filename("---"), FALLBACK_FILENAME);
        assert_eq!(normalize_filename(""), FALLBACK_FILENAME);
    }

    #[test]
    fn test_normalize_filename_keeps_non_ascii_names_distinct() {
        let budget = normalize_filename("会議メモ-予算");
        let review = normalize_filename("週次レビュー");

        assert_eq!(budget, "会議メモ-予算");
        assert_eq!(review, "週次レビュー");
        assert_ne!(budget, review);
        assert_eq!(normalize_filename("Ärger / Überblick"), "ärger-überblick");
    }

    #[test]
    fn test_parse_pipeline_request() {
        let req = parse_pipeline_request(r#"{"input_dir": "/home/me/inbox"}"#).unwrap();
        assert_eq!(req.input_dir(), Path::new("/home/me/inbox"));

        let req = parse_pipeline_request(r#"{"input_dir": " ./scans ", "note": "x"}"#).unwrap();
        assert_eq!(req.input_dir(), Path::new("./scans"));
    }

    #[test]
    fn test_parse_pipeline_request_errors() {
        for payload in [r#"{"dir": "/x"}"#, r#"{"input_dir": ""}"#, r#"{"input_dir": 3}"#, "nope"] {
            let err = parse_pipeline_request(payload).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidRequest(_)), "{payload}");
        }
    }

    #[test]
    fn test_template_conforming() {
        assert_eq!(check_template(CONFORMING), Ok(()));
    }

    #[test]
    fn test_template_extra_section_appended() {
        let body = format!("{CONFORMING}\n### Summary\nextra words\n");
        assert_eq!(
            check_template(&body),
            Err(TemplateIssue::ExtraSection("### Summary".to_string()))
        );
    }

    #[test]
    fn test_template_missing_section() {
        let body = CONFORMING.replace("### Action Items: Buy washer\n", "");
        assert_eq!(
            check_template(&body),
            Err(TemplateIssue::MissingSection("Action Items"))
        );
        assert_eq!(check_template(""), Err(TemplateIssue::MissingSection("Title")));
    }

    #[test]
    fn test_template_ignores_fenced_hashes() {
        let body = CONFORMING.replace(
            "Leak under sink",
            "Leak under sink\n```sh\n# not a heading\n```",
        );
        assert_eq!(check_template(&body), Ok(()));
    }
}
