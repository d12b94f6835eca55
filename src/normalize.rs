//! Text normalization utilities.
//!
//! The spreadsheet exports this pipeline consumes are inconsistently encoded:
//! names differ in quoting, internal whitespace, and letter case between the
//! authority list and the search-term list. [`normalize_key`] produces the
//! canonical join/dedup key both sides are matched on. [`slugify`] derives a
//! URL-safe identifier from the display names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[()\[\]{}"'`]"#).unwrap());
static SLUG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/|]").unwrap());
static SLUG_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SLUG_HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Canonicalizes a name into the key used for matching and deduplication.
///
/// Applies Unicode NFC normalization, strips straight and curly double
/// quotes, collapses whitespace runs to a single space, trims, and
/// lowercases. The result is only ever used as a lookup key, never for
/// display.
pub fn normalize_key(text: &str) -> String {
    let composed: String = text
        .nfc()
        .filter(|c| !matches!(c, '"' | '\u{201C}' | '\u{201D}'))
        .collect();

    composed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Derives a URL/identifier-safe slug from an item's display names.
///
/// Prefers the English name when present and non-empty, otherwise falls back
/// to the Korean name. Bracket and quote characters are stripped, path
/// separators and pipes become hyphens, whitespace collapses to hyphens, and
/// repeated or edge hyphens are removed.
///
/// Not persisted in any artifact today, but kept reproducible as the
/// candidate content-stable identifier.
pub fn slugify(name_en: Option<&str>, name_ko: &str) -> String {
    let base = match name_en.map(str::trim) {
        Some(en) if !en.is_empty() => en,
        _ => name_ko.trim(),
    };

    let lowered = base.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    let separated = SLUG_SEPARATOR.replace_all(&stripped, "-");
    let hyphenated = SLUG_WHITESPACE.replace_all(&separated, "-");
    let collapsed = SLUG_HYPHEN_RUN.replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_collapses_whitespace() {
        assert_eq!(normalize_key("  과도  (커터칼) "), "과도 (커터칼)");
        assert_eq!(normalize_key("a\t b\n c"), "a b c");
    }

    #[test]
    fn test_normalize_key_strips_double_quotes() {
        assert_eq!(normalize_key("\"라이터\""), "라이터");
        assert_eq!(normalize_key("\u{201C}라이터\u{201D}"), "라이터");
    }

    #[test]
    fn test_normalize_key_lowercases() {
        assert_eq!(normalize_key("Lithium Battery"), "lithium battery");
    }

    #[test]
    fn test_normalize_key_is_stable() {
        let once = normalize_key("  \"Gel\"  Type ");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn test_slugify_prefers_english() {
        assert_eq!(slugify(Some("Scissors"), "가위"), "scissors");
    }

    #[test]
    fn test_slugify_falls_back_to_korean() {
        assert_eq!(slugify(None, "가위"), "가위");
        assert_eq!(slugify(Some("   "), "가위"), "가위");
    }

    #[test]
    fn test_slugify_separators_and_brackets() {
        assert_eq!(
            slugify(Some("Liquid/Gel (100ml)"), "액체"),
            "liquid-gel-100ml"
        );
        assert_eq!(slugify(Some("a | b"), ""), "a-b");
    }

    #[test]
    fn test_slugify_collapses_and_trims_hyphens() {
        assert_eq!(slugify(Some("/knife//saw/"), ""), "knife-saw");
    }
}
