//! Internal helpers for slug derivation and field validation.
//!
//! These utilities are **not** part of the public API except for
//! [`slugify`], which callers use to preview the slug a name will get.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine, categories::SLUG_MAX_LEN};

/// Turn a display name into a URL-safe slug.
///
/// Accents are decomposed and dropped, anything that is not ASCII
/// alphanumeric, `_`, `-` or whitespace is removed, and runs of whitespace
/// and hyphens collapse into a single `-`. The result is lowercase and is
/// not truncated.
pub fn slugify(input: &str) -> String {
    let mut kept = String::with_capacity(input.len());
    for ch in input.nfkd() {
        if is_combining_mark(ch) || !ch.is_ascii() {
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch.is_ascii_whitespace() {
            kept.push(ch.to_ascii_lowercase());
        }
    }

    let mut out = String::with_capacity(kept.len());
    let mut pending_dash = false;
    for ch in kept.trim().chars() {
        if ch == '-' || ch.is_ascii_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.push(ch);
    }
    if pending_dash {
        out.push('-');
    }
    out
}

/// Slug for `name`, cut to the column limit.
pub(crate) fn derive_slug(name: &str) -> String {
    truncate_chars(&slugify(name), SLUG_MAX_LEN)
}

pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Whether `value` only uses the characters a slug column accepts.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

pub(crate) fn normalize_required_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "category name must not be empty".to_string(),
        ));
    }
    ensure_max_len("name", trimmed, crate::categories::NAME_MAX_LEN)?;
    Ok(trimmed.to_string())
}

pub(crate) fn ensure_max_len(label: &str, value: &str, max: usize) -> ResultEngine<()> {
    if value.chars().count() > max {
        return Err(EngineError::InvalidField(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_hyphenates_words() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Defense   & Security "), "defense-security");
        assert_eq!(slugify("State - Local"), "state-local");
    }

    #[test]
    fn slugify_strips_accents_and_symbols() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("C'est la vie!"), "cest-la-vie");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("日本"), "");
    }

    #[test]
    fn derive_slug_truncates() {
        let name = "a".repeat(80);
        assert_eq!(derive_slug(&name).len(), SLUG_MAX_LEN);
    }

    #[test]
    fn slug_charset() {
        assert!(is_valid_slug("tech-news_2"));
        assert!(!is_valid_slug("tech news"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn required_name_is_trimmed() {
        assert_eq!(normalize_required_name("  Tech ").unwrap(), "Tech");
        assert!(matches!(
            normalize_required_name("   "),
            Err(EngineError::InvalidName(_))
        ));
        assert!(matches!(
            normalize_required_name(&"x".repeat(101)),
            Err(EngineError::InvalidField(_))
        ));
    }
}
