//! Main module for babel library functionality
//!
//! The lexer is the only stage that lives here. The parser and code generators consume
//! its token stream.

pub mod lexer;
