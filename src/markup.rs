// src/markup.rs
//! Display helpers for the lightweight markup generated notes carry.
//! Consumers strip markers for plain rendering; the store never does.

use chrono::{DateTime, Utc};

const PREVIEW_LEN: usize = 150;

/// Drop the markup markers (`*`, `_`, `` ` ``, `#`) from `text`, leaving
/// the words and list dashes in place.
pub fn strip_markup(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '#'))
        .collect()
}

/// First ~150 characters of `content` for list previews, with a trailing
/// ellipsis when truncated. Cuts on a char boundary.
pub fn excerpt(content: &str) -> String {
    if content.chars().count() <= PREVIEW_LEN {
        return content.to_string();
    }
    let cut: String = content.chars().take(PREVIEW_LEN).collect();
    format!("{}...", cut)
}

/// Short date for list display, e.g. "Mar 4, 2026".
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_strip_markup_removes_markers() {
        assert_eq!(strip_markup("## Key **Points**"), " Key Points");
        assert_eq!(strip_markup("_italic_ and `code`"), "italic and code");
    }

    #[test]
    fn test_strip_markup_keeps_bullets() {
        assert_eq!(strip_markup("- a fact\n- another"), "- a fact\n- another");
    }

    #[test]
    fn test_excerpt_short_content_unchanged() {
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_excerpt_truncates_long_content() {
        let long = "x".repeat(400);
        let preview = excerpt(&long);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_excerpt_multibyte_safe() {
        let long = "é".repeat(200);
        let preview = excerpt(&long);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        assert_eq!(format_date(&dt), "Mar 4, 2026");
    }
}
