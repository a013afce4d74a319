//! Lexing errors and diagnostics
//!
//! Two things can go wrong while tokenizing:
//!
//!     Bad indentation is fatal. The document has no valid token stream past that point and
//!     the tokenizer reports a [LexError].
//!
//!     An unrecognized character is not. It is recorded as a [Diagnostic], skipped, and
//!     scanning continues.

use std::fmt;

/// Fatal errors that abort tokenizing a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A line's indentation differs from the current level by something other than a
    /// multiple of the indentation unit
    BadIndentation {
        line: usize,
        position: usize,
        indent: usize,
        current: usize,
    },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::BadIndentation {
                line,
                indent,
                current,
                ..
            } => write!(
                f,
                "Bad indentation at line {}: indent of {} is not a multiple of 4 away from the current level of {}",
                line, indent, current
            ),
        }
    }
}

impl std::error::Error for LexError {}

impl From<LexError> for String {
    fn from(err: LexError) -> Self {
        err.to_string()
    }
}

/// Recoverable problems found while tokenizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnrecognizedCharacter {
        character: char,
        line: usize,
        position: usize,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::UnrecognizedCharacter { line, .. } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedCharacter {
                character, line, ..
            } => write!(f, "Illegal character {:?} at line {}", character, line),
        }
    }
}
