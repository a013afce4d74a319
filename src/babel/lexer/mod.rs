//! Lexer module for the babel format
//!
//! This module contains the tokenization logic for babel interface definitions: token
//! definitions, the off-side rule for indentation, free-text capture for documentation
//! blocks, and the pull-based [Tokenizer] the parser drives.
//!
//! Indentation Handling
//!
//!     Blocks are delimited by indentation alone, in units of four spaces. The lexer turns
//!     level changes into INDENT and DEDENT tokens, which map nicely to brace tokens in
//!     more c-style syntaxes, so the parser never looks at whitespace. Every level opened
//!     during a document is closed by a DEDENT, at the latest when the input ends.
//!
//! Free Text
//!
//!     A `::` starts a documentation block one level deeper than the current one. Inside,
//!     lines are passed through verbatim as LINE tokens until a line drops below the
//!     block's level.

pub mod diagnostics;
pub mod escape;
pub mod formatting;
pub mod free_text;
pub mod indentation;
pub mod lexer_impl;
pub mod tokens;

pub use diagnostics::{Diagnostic, LexError};
pub use formatting::{render, render_with_locations};
pub use indentation::INDENT_WIDTH;
pub use lexer_impl::{lex, tokenize, Lexed, Mode, Tokenizer};
pub use tokens::{Literal, Token, TokenKind};
