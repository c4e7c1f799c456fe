//! Required-field validation shared by the edit surfaces.

use regex::Regex;
use std::sync::OnceLock;

/// Required fields must contain at least one non-whitespace character after
/// optional leading whitespace.
const NON_BLANK_PATTERN: &str = r"^\s*\S.*$";

fn non_blank() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NON_BLANK_PATTERN).expect("pattern is valid"))
}

/// Returns `true` when `text` satisfies the required-field pattern.
pub fn is_non_blank(text: &str) -> bool {
    non_blank().is_match(text)
}
