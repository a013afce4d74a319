//! Implementation of the babel lexer
//!
//! [Tokenizer] is a pull lexer: the parser asks for one token at a time. Structured content
//! is matched by the logos rule table in [RawToken]; everything logos cannot express (the
//! off-side rule, free-text capture, closing blocks at end of input) lives here.
//!
//! One scan step may produce several tokens, a NEWLINE followed by DEDENTs for example.
//! Those go into a FIFO and are handed out before the cursor moves again.

use super::diagnostics::{Diagnostic, LexError};
use super::escape::unescape_string;
use super::free_text::{capture_line, continuation, Continuation};
use super::indentation::{closing_dents, dents, level_delta, measure, peek_line, INDENT_WIDTH};
use super::tokens::{Literal, RawToken, Token, TokenKind};
use logos::Logos;
use std::collections::VecDeque;
use tracing::{error, trace, warn};

/// Which rule set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FreeText,
}

/// Outcome of a single scan step
enum Scan {
    Token(Token),
    Tokens(Vec<Token>),
    Skipped,
}

/// Pull-based tokenizer over a single babel document
#[derive(Debug)]
pub struct Tokenizer {
    source: String,
    cursor: usize,
    line: usize,
    indent_width: usize,
    mode: Mode,
    pending: VecDeque<Token>,
    last_emitted: Option<TokenKind>,
    diagnostics: Vec<Diagnostic>,
    failure: Option<LexError>,
}

impl Tokenizer {
    /// Create a tokenizer for a document, appending a final line break if it lacks one
    pub fn new(source: &str) -> Self {
        let mut source = source.to_string();
        if !source.ends_with('\n') {
            source.push('\n');
        }

        Tokenizer {
            source,
            cursor: 0,
            line: 1,
            indent_width: 0,
            mode: Mode::Normal,
            pending: VecDeque::new(),
            last_emitted: None,
            diagnostics: Vec::new(),
            failure: None,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` once the input is exhausted, and keeps doing so on further calls.
    /// After a fatal error every call returns that error again.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let token = match self.pending.pop_front() {
            Some(token) => Some(token),
            None => match self.scan() {
                Ok(token) => token,
                Err(err) => {
                    error!(target: "babel::lexer", "{}", err);
                    self.failure = Some(err.clone());
                    return Err(err);
                }
            },
        };

        if let Some(token) = &token {
            self.last_emitted = Some(token.kind());
        }
        Ok(token)
    }

    /// Recoverable problems reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current indentation width in columns
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Run scan steps until one yields a token or the input ends
    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            if self.cursor >= self.source.len() {
                return Ok(self.close_blocks());
            }

            let step = match self.mode {
                Mode::Normal => self.scan_normal()?,
                Mode::FreeText => self.scan_free_text()?,
            };

            match step {
                Scan::Token(token) => return Ok(Some(token)),
                Scan::Tokens(tokens) => {
                    self.pending.extend(tokens);
                    return Ok(self.pending.pop_front());
                }
                Scan::Skipped => continue,
            }
        }
    }

    fn scan_normal(&mut self) -> Result<Scan, LexError> {
        let mut lexer = RawToken::lexer(&self.source[self.cursor..]);
        let Some(result) = lexer.next() else {
            // Only skippable whitespace was left
            self.cursor = self.source.len();
            return Ok(Scan::Skipped);
        };
        let span = lexer.span();
        let start = self.cursor + span.start;
        let end = self.cursor + span.end;

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                self.skip_unrecognized(start);
                return Ok(Scan::Skipped);
            }
        };

        self.cursor = end;
        let line = self.line;
        let slice = &self.source[start..end];

        let token = match raw {
            RawToken::Identifier => Token::new(TokenKind::classify_word(slice), slice, line, start),
            RawToken::Path => Token::new(TokenKind::Path, slice, line, start),
            RawToken::True | RawToken::False => Token::new(TokenKind::Boolean, slice, line, start)
                .with_value(Some(Literal::Bool(raw == RawToken::True))),
            RawToken::Null => {
                Token::new(TokenKind::Null, slice, line, start).with_value(Some(Literal::Null))
            }
            RawToken::Float => {
                let value = slice.parse::<f64>().ok().map(Literal::Float);
                Token::new(TokenKind::Float, slice, line, start).with_value(value)
            }
            RawToken::Integer => {
                let value = slice.parse::<i64>().ok().map(Literal::Integer);
                if value.is_none() {
                    warn!(target: "babel::lexer", "Integer literal {} at line {} is out of range", slice, line);
                }
                Token::new(TokenKind::Integer, slice, line, start).with_value(value)
            }
            RawToken::String => {
                let text = unescape_string(&slice[1..slice.len() - 1]);
                self.line += count_newlines(slice);
                Token::new(TokenKind::String, text, line, start)
            }
            RawToken::LeftParen => Token::new(TokenKind::Lpar, slice, line, start),
            RawToken::RightParen => Token::new(TokenKind::Rpar, slice, line, start),
            RawToken::Equals => Token::new(TokenKind::Eq, slice, line, start),
            RawToken::Comma => Token::new(TokenKind::Comma, slice, line, start),
            RawToken::Colon => Token::new(TokenKind::Colon, slice, line, start),
            RawToken::DoubleColon => {
                self.indent_width += INDENT_WIDTH;
                self.mode = Mode::FreeText;
                trace!(target: "babel::lexer", "Entering free text at line {}, baseline {}", line, self.indent_width);
                Token::new(TokenKind::DoubleColon, slice, line, start)
            }
            RawToken::Newline => return self.scan_newlines(start, end),
            RawToken::Comment => {
                self.line += count_newlines(slice);
                return Ok(Scan::Skipped);
            }
        };

        Ok(Scan::Token(token))
    }

    /// Apply the off-side rule after a run of line breaks spanning `start..end`
    fn scan_newlines(&mut self, start: usize, end: usize) -> Result<Scan, LexError> {
        let newline = Token::new(TokenKind::Newline, &self.source[start..end], self.line, start);
        self.line += end - start;

        let next = match peek_line(&self.source, end) {
            None | Some("") => return Ok(Scan::Token(newline)),
            Some(next) => next,
        };

        let indent = measure(next);
        let delta = level_delta(self.indent_width, indent, self.line, end)?;
        self.indent_width = indent;
        if delta == 0 {
            return Ok(Scan::Token(newline));
        }

        trace!(target: "babel::lexer", "Indentation changes by {} levels at line {}", delta, self.line);
        let mut tokens = vec![newline];
        tokens.extend(dents(delta, self.line, end));
        Ok(Scan::Tokens(tokens))
    }

    fn scan_free_text(&mut self) -> Result<Scan, LexError> {
        let Some(captured) = capture_line(&self.source, self.cursor, self.indent_width) else {
            self.cursor = self.source.len();
            return Ok(Scan::Skipped);
        };

        let text = &self.source[captured.start..captured.end];
        let token = Token::new(TokenKind::Line, text, self.line, captured.start);
        self.line += count_newlines(text);
        self.cursor = captured.end;

        match continuation(&self.source, captured.end, self.indent_width, self.line)? {
            Continuation::Continue => Ok(Scan::Token(token)),
            Continuation::Close { levels, indent } => {
                trace!(target: "babel::lexer", "Leaving free text at line {}", self.line);
                self.mode = Mode::Normal;
                self.indent_width = indent;
                let mut tokens = vec![token];
                tokens.extend(closing_dents(levels, self.line, captured.end));
                Ok(Scan::Tokens(tokens))
            }
        }
    }

    /// Close every open level at end of input
    fn close_blocks(&mut self) -> Option<Token> {
        if self.indent_width == 0 {
            return None;
        }

        let position = self.source.len();
        if !matches!(
            self.last_emitted,
            None | Some(TokenKind::Newline) | Some(TokenKind::Line)
        ) {
            self.pending
                .push_back(Token::new(TokenKind::Newline, "\n", self.line, position));
        }
        self.pending.extend(closing_dents(
            self.indent_width / INDENT_WIDTH,
            self.line,
            position,
        ));
        self.indent_width = 0;

        self.pending.pop_front()
    }

    fn skip_unrecognized(&mut self, position: usize) {
        let Some(character) = self.source[position..].chars().next() else {
            self.cursor = self.source.len();
            return;
        };

        let diagnostic = Diagnostic::UnrecognizedCharacter {
            character,
            line: self.line,
            position,
        };
        error!(target: "babel::lexer", "{}", diagnostic);
        self.diagnostics.push(diagnostic);
        self.cursor = position + character.len_utf8();
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() {
            return None;
        }
        self.next_token().transpose()
    }
}

impl std::iter::FusedIterator for Tokenizer {}

fn count_newlines(text: &str) -> usize {
    memchr::memchr_iter(b'\n', text.as_bytes()).count()
}

/// Tokens of a fully scanned document together with the recoverable diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize a whole document and keep the diagnostics
pub fn lex(source: &str) -> Result<Lexed, LexError> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = tokenizer.next_token()? {
        tokens.push(token);
    }

    Ok(Lexed {
        tokens,
        diagnostics: tokenizer.take_diagnostics(),
    })
}

/// Convenience function to tokenize a string and collect all tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    lex(source).map(|lexed| lexed.tokens)
}
