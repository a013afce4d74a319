//! Escape sequence processing for string literals
//!
//! Recognized escapes: `\n`, `\t`. Any other escaped character stands for itself, which
//! covers `\\` and `\"`.

/// Resolve a single escaped character to its replacement.
#[inline]
fn resolve_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

/// Process escape sequences in the body of a string literal (quotes already removed).
///
/// A trailing lone backslash cannot come out of the string rule, but is kept literally.
pub fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => result.push(resolve_escape(esc)),
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}
