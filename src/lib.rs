//! # babel
//!
//! The lexical front end of the babel interface definition language.
//!
//! Source text goes in, a flat stream of typed tokens comes out, with block structure made
//! explicit through synthetic INDENT/DEDENT tokens. See the [lexer](babel::lexer) module.

pub mod babel;
