//! Token definitions for the babel format
//!
//! This module defines the tokens handed to the parser and the raw rule table used to
//! scan structured (non free-text) content. The raw rules are defined using the logos
//! derive macro, which compiles them once into a static state machine shared by every
//! tokenizer instance.
//!
//! Raw vs. Emitted Tokens
//!
//!     [RawToken] is what logos recognizes at the cursor. Some raw tokens never reach the
//!     parser (comments), some are reclassified (identifiers become keywords), and some
//!     emitted tokens have no raw counterpart at all (INDENT, DEDENT, LINE). [Token] is
//!     the record the parser actually receives.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Words that are classified as `KEYWORD` instead of `ID`.
pub const KEYWORDS: &[&str] = &[
    "alias",
    "doc",
    "example",
    "extends",
    "extras",
    "include",
    "namespace",
    "nullable",
    "op",
    "struct",
    "union",
    "request",
    "response",
    "error",
];

/// Raw scanning rules for normal (structured) content
///
/// Longest match wins. For equal lengths, literal tokens beat regexes, which is what makes
/// `true` a boolean while `trueish` stays an identifier.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t]+")]
pub enum RawToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Identifier,

    #[regex(r"/[/a-zA-Z0-9_-]*")]
    Path,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"[0-9]*\.[0-9]+(E[+-]?[0-9]+)?|[1-9][0-9]*E[+-]?[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,

    // A run of line breaks is a single scan event
    #[regex(r"\n+")]
    Newline,

    #[regex(r"#[^\n]*\n+")]
    Comment,
}

/// The closed set of token kinds the parser consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Colon,
    Id,
    Keyword,
    Path,
    DoubleColon,
    Line,
    Dedent,
    Indent,
    Newline,
    Comma,
    Eq,
    Lpar,
    Rpar,
    Boolean,
    Float,
    Integer,
    Null,
    String,
    Error,
    Extras,
    Include,
    Op,
    Request,
    Response,
}

impl TokenKind {
    /// Classify an identifier spelling.
    ///
    /// Reserved words get their own kind, the remaining keywords are `Keyword`, anything
    /// else is a plain `Id`.
    pub fn classify_word(word: &str) -> TokenKind {
        match word {
            "error" => TokenKind::Error,
            "extras" => TokenKind::Extras,
            "include" => TokenKind::Include,
            "op" => TokenKind::Op,
            "request" => TokenKind::Request,
            "response" => TokenKind::Response,
            _ if KEYWORDS.contains(&word) => TokenKind::Keyword,
            _ => TokenKind::Id,
        }
    }

    /// The name the parser grammar uses for this kind
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Colon => "COLON",
            TokenKind::Id => "ID",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Path => "PATH",
            TokenKind::DoubleColon => "DOUBLE_COLON",
            TokenKind::Line => "LINE",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Indent => "INDENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Comma => "COMMA",
            TokenKind::Eq => "EQ",
            TokenKind::Lpar => "LPAR",
            TokenKind::Rpar => "RPAR",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Float => "FLOAT",
            TokenKind::Integer => "INTEGER",
            TokenKind::Null => "NULL",
            TokenKind::String => "STRING",
            TokenKind::Error => "ERROR",
            TokenKind::Extras => "EXTRAS",
            TokenKind::Include => "INCLUDE",
            TokenKind::Op => "OP",
            TokenKind::Request => "REQUEST",
            TokenKind::Response => "RESPONSE",
        }
    }

    /// Check if this kind is fully described by its name, so the text adds nothing
    pub fn is_fixed(self) -> bool {
        matches!(
            self,
            TokenKind::Colon
                | TokenKind::DoubleColon
                | TokenKind::Comma
                | TokenKind::Eq
                | TokenKind::Lpar
                | TokenKind::Rpar
                | TokenKind::Newline
                | TokenKind::Indent
                | TokenKind::Dedent
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved value of a literal token
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Null,
}

/// A token as delivered to the parser
///
/// Tokens are immutable once built: the fields are only readable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Literal>,
    line: usize,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            value: None,
            line,
            position,
        }
    }

    pub(crate) fn with_value(mut self, value: Option<Literal>) -> Self {
        self.value = value;
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The matched lexeme, with escapes resolved for strings
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<Literal> {
        self.value
    }

    /// 1-based line the token starts on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset the token starts at
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_fixed() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({:?})", self.kind, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_identifier_and_punctuation() {
        assert_eq!(
            raw("foo: bar"),
            vec![RawToken::Identifier, RawToken::Colon, RawToken::Identifier]
        );
    }

    #[test]
    fn test_double_colon_beats_colon() {
        assert_eq!(raw("::"), vec![RawToken::DoubleColon]);
        assert_eq!(raw(":::"), vec![RawToken::DoubleColon, RawToken::Colon]);
    }

    #[test]
    fn test_boolean_words_vs_identifiers() {
        assert_eq!(raw("true"), vec![RawToken::True]);
        assert_eq!(raw("false"), vec![RawToken::False]);
        assert_eq!(raw("null"), vec![RawToken::Null]);
        assert_eq!(raw("trueish"), vec![RawToken::Identifier]);
        assert_eq!(raw("nullable"), vec![RawToken::Identifier]);
    }

    #[test]
    fn test_float_beats_integer() {
        assert_eq!(raw("1.5"), vec![RawToken::Float]);
        assert_eq!(raw(".5"), vec![RawToken::Float]);
        assert_eq!(raw("12E3"), vec![RawToken::Float]);
        assert_eq!(raw("1.5E-3"), vec![RawToken::Float]);
        assert_eq!(raw("42"), vec![RawToken::Integer]);
    }

    #[test]
    fn test_path() {
        assert_eq!(raw("/users/get_account"), vec![RawToken::Path]);
        assert_eq!(raw("/"), vec![RawToken::Path]);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(raw(r#""a \" b""#), vec![RawToken::String]);
    }

    #[test]
    fn test_newline_run_is_one_token() {
        assert_eq!(raw("\n\n\n"), vec![RawToken::Newline]);
    }

    #[test]
    fn test_comment_swallows_following_newlines() {
        assert_eq!(
            raw("a # note\n\nb"),
            vec![RawToken::Identifier, RawToken::Comment, RawToken::Identifier]
        );
    }

    #[test]
    fn test_unrecognized_character_is_an_error() {
        let mut lexer = RawToken::lexer("@");
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn test_classify_word() {
        assert_eq!(TokenKind::classify_word("struct"), TokenKind::Keyword);
        assert_eq!(TokenKind::classify_word("nullable"), TokenKind::Keyword);
        assert_eq!(TokenKind::classify_word("op"), TokenKind::Op);
        assert_eq!(TokenKind::classify_word("error"), TokenKind::Error);
        assert_eq!(TokenKind::classify_word("Int32"), TokenKind::Id);
        assert_eq!(TokenKind::classify_word("structure"), TokenKind::Id);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(TokenKind::Colon, ":", 1, 0).to_string(), "COLON");
        assert_eq!(
            Token::new(TokenKind::Id, "foo", 1, 0).to_string(),
            "ID(\"foo\")"
        );
    }

    #[test]
    fn test_kind_serializes_in_grammar_spelling() {
        let json = serde_json::to_string(&TokenKind::DoubleColon).unwrap();
        assert_eq!(json, "\"DOUBLE_COLON\"");
    }
}
