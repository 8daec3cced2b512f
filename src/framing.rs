//! Preprocessing that undoes the framing device firmware and terminals add
//! around the payload text.
//!
//! Both steps are independent of marker matching: [`strip_line_prefixes`]
//! removes logging/timestamp prefixes such as `[00:00:01] ` and
//! [`remove_line_endings`] joins lines that the transport wrapped.
use once_cell::sync::Lazy;
use regex::Regex;

// Greedy: the prefix ends at the last "] " on the line.
static LINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*\] (?P<rest>.*)$").expect("line prefix pattern"));

/// Replace every line of the form `<anything>] <rest>` by `<rest>`.
/// Lines without such a prefix are left untouched.
pub fn strip_line_prefixes(text: &str) -> String {
    LINE_PREFIX.replace_all(text, "${rest}").into_owned()
}

/// Remove every carriage return and line feed.
pub fn remove_line_endings(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// Both preprocessing steps, in order.
pub fn normalize(text: &str) -> String {
    remove_line_endings(&strip_line_prefixes(text))
}
