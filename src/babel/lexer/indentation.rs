//! Indentation handling for the babel lexer
//!
//! Blocks have no explicit delimiters, so the lexer infers them from leading whitespace and
//! emits INDENT and DEDENT tokens that the parser treats like open/close braces.
//!
//! # Algorithm
//!
//! 1. After a run of line breaks, look at the next physical line without consuming it
//! 2. Blank lines never change the level
//! 3. Otherwise measure the line's leading whitespace and compare with the current width:
//!    - If greater: one INDENT per additional level
//!    - If less: one DEDENT per level closed
//!    - If equal: nothing
//! 4. A difference that is not a whole number of levels is an error
//!
//! Free-text blocks use the same measurement, but only ever close levels.

use super::diagnostics::LexError;
use super::tokens::{Token, TokenKind};
use memchr::memchr;
use std::cmp::Ordering;

/// Width of one indentation level, in columns
pub const INDENT_WIDTH: usize = 4;

/// Text carried by synthetic INDENT and DEDENT tokens
const DENT_TEXT: &str = "\t";

/// Return the physical line starting at `pos`, without its line break.
///
/// Returns `None` at end of input.
pub fn peek_line(source: &str, pos: usize) -> Option<&str> {
    if pos >= source.len() {
        return None;
    }
    let rest = &source[pos..];
    let end = memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Count the leading spaces and tabs of a line, one column each
pub fn measure(line: &str) -> usize {
    line.bytes()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count()
}

/// Number of levels between the current width and a line's indentation.
///
/// Positive when the line opens levels, negative when it closes them.
pub fn level_delta(
    current: usize,
    indent: usize,
    line: usize,
    position: usize,
) -> Result<isize, LexError> {
    let spaces = indent as isize - current as isize;
    if spaces % INDENT_WIDTH as isize != 0 {
        return Err(LexError::BadIndentation {
            line,
            position,
            indent,
            current,
        });
    }
    Ok(spaces / INDENT_WIDTH as isize)
}

/// Build the synthetic tokens for a level change
pub fn dents(delta: isize, line: usize, position: usize) -> Vec<Token> {
    let kind = match delta.cmp(&0) {
        Ordering::Greater => TokenKind::Indent,
        Ordering::Less => TokenKind::Dedent,
        Ordering::Equal => return Vec::new(),
    };
    (0..delta.unsigned_abs())
        .map(|_| Token::new(kind, DENT_TEXT, line, position))
        .collect()
}

/// Build `count` DEDENT tokens, used when closing blocks at end of input
pub fn closing_dents(count: usize, line: usize, position: usize) -> Vec<Token> {
    (0..count)
        .map(|_| Token::new(TokenKind::Dedent, DENT_TEXT, line, position))
        .collect()
}
