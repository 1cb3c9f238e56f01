//! Text cleanup applied to every display-name token

use once_cell::sync::Lazy;
use regex::Regex;

// Script and style bodies are dropped entirely, not just their tags.
#[allow(clippy::expect_used)]
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
        .expect("script/style pattern is valid")
});

#[allow(clippy::expect_used)]
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Strip markup and control characters, collapsing whitespace runs.
///
/// The result never has leading or trailing whitespace and never contains
/// a control character.
pub fn sanitize_text(value: &str) -> String {
    let without_blocks = SCRIPT_OR_STYLE.replace_all(value, "");
    let without_tags = TAG.replace_all(&without_blocks, "");

    let spaced: String = without_tags
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
