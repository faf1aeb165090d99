//! Input sanitization and validation for task fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::{DomainError, DomainResult};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 1000;

// Script/style elements are dropped with their content; all other markup
// is stripped down to its inner text.
static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
});
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Strip markup from user input and trim surrounding whitespace.
pub fn sanitize_input(input: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(input, "");
    let without_comments = COMMENT_RE.replace_all(&without_scripts, "");
    let without_tags = TAG_RE.replace_all(&without_comments, "");
    without_tags.trim().to_string()
}

/// Validate sanitized task fields, aggregating every failure.
pub fn validate_task_input(title: &str, description: Option<&str>) -> DomainResult<()> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(format!("Title must be less than {MAX_TITLE_LEN} characters"));
    }

    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "Description must be less than {MAX_DESCRIPTION_LEN} characters"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags_keeps_text() {
        assert_eq!(sanitize_input("<b>fix</b> the build"), "fix the build");
        assert_eq!(sanitize_input("  plain title  "), "plain title");
    }

    #[test]
    fn test_sanitize_drops_script_content() {
        assert_eq!(
            sanitize_input("hello<script>alert('x')</script> world"),
            "hello world"
        );
        assert_eq!(sanitize_input("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn test_validate_empty_title() {
        let err = validate_task_input("", None).unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_validate_title_too_long() {
        let title = "x".repeat(201);
        let err = validate_task_input(&title, None).unwrap_err();
        assert!(err.to_string().contains("Title must be less than 200"));

        // Exactly 200 is fine
        let title = "x".repeat(200);
        assert!(validate_task_input(&title, None).is_ok());
    }

    #[test]
    fn test_validate_description_too_long() {
        let description = "d".repeat(1001);
        let err = validate_task_input("ok", Some(&description)).unwrap_err();
        assert!(err.to_string().contains("Description must be less than 1000"));
    }

    #[test]
    fn test_validate_aggregates_errors() {
        let description = "d".repeat(1001);
        let err = validate_task_input("", Some(&description)).unwrap_err();
        match err {
            DomainError::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
