//! Free-text capture
//!
//! A `::` switches the lexer into free-text mode for documentation. In this mode nothing is
//! tokenized: each physical line becomes one LINE token, trailing line break included. The
//! block ends when a following line drops below the block's baseline indentation.
//!
//!     struct Account
//!         doc::
//!             Free text, captured
//!             line by line.
//!         id Int64
//!
//! Leading whitespace up to the baseline is indentation, not content. Anything deeper stays
//! in the captured text so nested layout inside documentation survives.

use super::diagnostics::LexError;
use super::indentation::{level_delta, measure, peek_line};
use memchr::memchr;

/// Byte range of a captured free-text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedLine {
    pub start: usize,
    pub end: usize,
}

/// What comes after a captured line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The block goes on (or the input ended)
    Continue,
    /// The next line closes `levels` levels and sits at `indent` columns
    Close { levels: usize, indent: usize },
}

/// Capture the line at `cursor`.
///
/// `baseline` is the block's indentation width. At the start of a physical line at most
/// that many leading spaces/tabs are skipped; in the middle of a line (right after `::`)
/// all of them are. Returns `None` when only whitespace is left before end of input.
pub fn capture_line(source: &str, cursor: usize, baseline: usize) -> Option<CapturedLine> {
    let bytes = source.as_bytes();
    let at_line_start = cursor == 0 || bytes[cursor - 1] == b'\n';
    let limit = if at_line_start { baseline } else { usize::MAX };

    let mut start = cursor;
    let mut skipped = 0;
    while skipped < limit && start < bytes.len() && matches!(bytes[start], b' ' | b'\t') {
        start += 1;
        skipped += 1;
    }

    if start >= bytes.len() {
        return None;
    }

    let end = match memchr(b'\n', &bytes[start..]) {
        Some(offset) => start + offset + 1,
        None => bytes.len(),
    };
    Some(CapturedLine { start, end })
}

/// Decide whether free text continues after a line that ended at `next_line_pos`.
///
/// Only the single following physical line is inspected. A blank line always continues
/// the block; since it is captured as a LINE of its own, the line after it gets checked
/// on the next step.
pub fn continuation(
    source: &str,
    next_line_pos: usize,
    baseline: usize,
    next_line_number: usize,
) -> Result<Continuation, LexError> {
    let line = match peek_line(source, next_line_pos) {
        None => return Ok(Continuation::Continue),
        Some("") => return Ok(Continuation::Continue),
        Some(line) => line,
    };

    let indent = measure(line);
    let delta = level_delta(baseline, indent, next_line_number, next_line_pos)?;
    if delta >= 0 {
        // Deeper indentation inside free text is content, not structure
        return Ok(Continuation::Continue);
    }

    Ok(Continuation::Close {
        levels: delta.unsigned_abs(),
        indent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured<'a>(source: &'a str, cursor: usize, baseline: usize) -> Option<&'a str> {
        capture_line(source, cursor, baseline).map(|line| &source[line.start..line.end])
    }

    #[test]
    fn test_capture_rest_of_double_colon_line() {
        let source = "doc:: trailing words\n";
        assert_eq!(captured(source, 5, 4), Some("trailing words\n"));
    }

    #[test]
    fn test_capture_empty_rest_of_line() {
        let source = "doc::\n    text\n";
        assert_eq!(captured(source, 5, 4), Some("\n"));
    }

    #[test]
    fn test_capture_strips_only_baseline_indentation() {
        let source = "            nested\n";
        assert_eq!(captured(source, 0, 8), Some("    nested\n"));
        assert_eq!(captured(source, 0, 12), Some("nested\n"));
    }

    #[test]
    fn test_capture_blank_line() {
        let source = "a\n\nb\n";
        assert_eq!(captured(source, 2, 4), Some("\n"));
    }

    #[test]
    fn test_capture_trailing_whitespace_only() {
        let source = "a\n    ";
        assert_eq!(capture_line(source, 2, 4), None);
    }

    #[test]
    fn test_continuation_at_end_of_input() {
        let source = "text\n";
        assert_eq!(
            continuation(source, source.len(), 4, 2),
            Ok(Continuation::Continue)
        );
    }

    #[test]
    fn test_continuation_on_blank_line() {
        assert_eq!(continuation("\nfoo\n", 0, 4, 2), Ok(Continuation::Continue));
    }

    #[test]
    fn test_continuation_at_or_above_baseline() {
        assert_eq!(
            continuation("    more\n", 0, 4, 2),
            Ok(Continuation::Continue)
        );
        assert_eq!(
            continuation("        deeper\n", 0, 4, 2),
            Ok(Continuation::Continue)
        );
    }

    #[test]
    fn test_continuation_closes_levels() {
        assert_eq!(
            continuation("field Int32\n", 0, 8, 2),
            Ok(Continuation::Close {
                levels: 2,
                indent: 0
            })
        );
        assert_eq!(
            continuation("    field Int32\n", 0, 8, 2),
            Ok(Continuation::Close {
                levels: 1,
                indent: 4
            })
        );
    }

    #[test]
    fn test_continuation_rejects_partial_levels() {
        assert!(matches!(
            continuation("      odd\n", 0, 4, 9),
            Err(LexError::BadIndentation { line: 9, indent: 6, .. })
        ));
    }
}
