//! Content piece classification and text helpers.

use crate::error::CoreError;
use crate::macros::define_str_enum;

/// Maximum length for a content body (characters).
pub const MAX_BODY_LENGTH: usize = 200_000;

/// Separator placed between paragraphs of composed final text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

define_str_enum! {
    /// The kind of marketing copy a piece holds.
    ContentType ("content type", VALID_CONTENT_TYPES) {
        Headline = "headline",
        Description = "description",
        SocialPost = "social_post",
        EmailSubject = "email_subject",
        BlogPost = "blog_post",
        AdCopy = "ad_copy",
        ProductDescription = "product_description",
        LandingPage = "landing_page",
    }
}

define_str_enum! {
    /// Editorial priority.
    Priority ("priority", VALID_PRIORITIES) {
        Low = "low",
        Medium = "medium",
        High = "high",
        Urgent = "urgent",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Join title, description and body into one canonical text.
///
/// Each non-empty part becomes its own paragraph; blank parts are skipped.
pub fn compose_final_text(
    title: Option<&str>,
    description: Option<&str>,
    body: Option<&str>,
) -> String {
    [title, description, body]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Validate a language tag such as `en`, `de-DE` or `zh-Hant`.
///
/// Accepts a 2-3 letter primary subtag followed by up to two alphanumeric
/// subtags of 2-8 characters.
pub fn validate_language_code(code: &str) -> Result<(), CoreError> {
    let mut parts = code.split('-');
    let primary = parts.next().unwrap_or_default();
    let primary_ok =
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());

    let rest: Vec<&str> = parts.collect();
    let rest_ok = rest.len() <= 2
        && rest
            .iter()
            .all(|p| (2..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()));

    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid language code '{code}'. Expected a tag like 'en' or 'en-US'"
        )))
    }
}

/// Validate a body's length.
pub fn validate_body(body: Option<&str>) -> Result<(), CoreError> {
    if body.is_some_and(|b| b.chars().count() > MAX_BODY_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Content exceeds maximum length of {MAX_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_joins_with_blank_line() {
        assert_eq!(compose_final_text(Some("T"), None, Some("B")), "T\n\nB");
    }

    #[test]
    fn compose_skips_empty_parts() {
        assert_eq!(compose_final_text(Some(""), Some("  "), Some("Body")), "Body");
        assert_eq!(compose_final_text(None, None, None), "");
    }

    #[test]
    fn compose_keeps_all_three_in_order() {
        assert_eq!(
            compose_final_text(Some("Title"), Some("Desc"), Some("Body")),
            "Title\n\nDesc\n\nBody"
        );
    }

    #[test]
    fn language_codes() {
        for ok in ["en", "de-DE", "zh-Hant", "es-419", "fil"] {
            assert!(validate_language_code(ok).is_ok(), "{ok}");
        }
        for bad in ["", "e", "english", "en_US", "en-", "1a"] {
            assert!(validate_language_code(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn content_type_set_is_closed() {
        assert_eq!(VALID_CONTENT_TYPES.len(), 8);
        assert_eq!(
            ContentType::from_str_value("social_post").unwrap(),
            ContentType::SocialPost
        );
        assert!(ContentType::from_str_value("podcast").is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
