//! Question text normalization.

use regex::Regex;
use std::sync::OnceLock;

fn reading_annotation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Hiragana block plus the nakaten.
    RE.get_or_init(|| Regex::new(r"\([\u{3041}-\u{309F}・]+\)").expect("static regex"))
}

/// Normalize a raw question before tokenization.
///
/// Full-width parentheses become ASCII, parenthesised hiragana readings such
/// as `漢字(かんじ)` are dropped, and question marks (ASCII or full-width) are
/// stripped.
pub fn normalize(question: &str) -> String {
    let ascii_parens: String = question
        .chars()
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect();
    reading_annotation()
        .replace_all(&ascii_parens, "")
        .chars()
        .filter(|c| !matches!(c, '?' | '？'))
        .collect()
}
