//! LLM prompts for classification, formatting and request resolution.

/// Note template the generation service fills in.
pub const NOTE_TEMPLATE: &str = r#"# {Title}
## Date: {date}

### Key Points: {key_points}

### Action Items: {action_items}

### Next Steps: {next_steps}
"#;

/// System instructions pinning the formatter's response shape.
pub const FORMAT_SYSTEM_PROMPT: &str = r#"Return a valid JSON object with exactly this shape and no other keys:
{
    "filename": "kebab-case-string",
    "markdown": "the filled in markdown template. DO NOT ADD ANY EXTRA SECTIONS"
}"#;

/// Prompt for turning extracted text into a note.
pub const FORMAT_PROMPT: &str = r#"Fill the following markdown template using the content below, and
create a suitable file name in kebab case based on the content.
DO NOT ADD ANY EXTRA SECTIONS TO THE END OF THE TEMPLATE.

Template:
{template}

Content:
{content}"#;

/// Prompt for extracting the input directory from a user instruction.
pub const RESOLVE_REQUEST_PROMPT: &str = r#"Extract the input folder from the user's request.
Return JSON only with:
{"input_dir": "string"}

Instruction:
{request}"#;

/// Prompt for choosing an extraction tool.
pub const CLASSIFY_PROMPT: &str = "Choose the correct tool for this file: {path}";

/// Format the note prompt for a block of extracted text.
pub fn format_note_prompt(content: &str) -> String {
    FORMAT_PROMPT
        .replace("{template}", NOTE_TEMPLATE)
        .replace("{content}", content)
}

/// Format the request resolution prompt.
pub fn format_resolve_prompt(request: &str) -> String {
    RESOLVE_REQUEST_PROMPT.replace("{request}", request)
}

/// Format the classification prompt.
pub fn format_classify_prompt(path: &str) -> String {
    CLASSIFY_PROMPT.replace("{path}", path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::check_template;

    #[test]
    fn test_note_prompt_embeds_template_and_content() {
        let prompt = format_note_prompt("Call the plumber on Friday");

        assert!(prompt.contains("### Action Items: {action_items}"));
        assert!(prompt.ends_with("Call the plumber on Friday"));
        assert!(!prompt.contains("{content}"));
    }

    #[test]
    fn test_note_prompt_with_empty_content() {
        let prompt = format_note_prompt("");
        assert!(prompt.ends_with("Content:\n"));
    }

    #[test]
    fn test_template_passes_its_own_check() {
        assert_eq!(check_template(NOTE_TEMPLATE), Ok(()));
    }

    #[test]
    fn test_resolve_and_classify_prompts() {
        assert!(format_resolve_prompt("notes in ~/inbox").ends_with("notes in ~/inbox"));
        assert_eq!(
            format_classify_prompt("/in/a.pdf"),
            "Choose the correct tool for this file: /in/a.pdf"
        );
    }
}
