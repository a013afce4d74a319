//! Human-readable rendering of token streams
//!
//! Used by the `babel tokens` command and by snapshot tests. Each token goes on its own
//! line: fixed tokens by kind name alone (`COLON`, `INDENT`), everything else with its text
//! (`ID("Account")`, `LINE("Some text\n")`).

use super::tokens::Token;
use std::fmt::Write;

/// Render tokens one per line
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{}", token);
    }
    out
}

/// Render tokens one per line, prefixed with `line:position`
pub fn render_with_locations(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{}:{} {}", token.line(), token.position(), token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::babel::lexer::tokens::TokenKind;

    #[test]
    fn test_render() {
        let tokens = vec![
            Token::new(TokenKind::Id, "foo", 1, 0),
            Token::new(TokenKind::Colon, ":", 1, 3),
            Token::new(TokenKind::Line, "text\n", 2, 5),
        ];
        assert_eq!(render(&tokens), "ID(\"foo\")\nCOLON\nLINE(\"text\\n\")\n");
    }

    #[test]
    fn test_render_with_locations() {
        let tokens = vec![Token::new(TokenKind::Newline, "\n", 3, 17)];
        assert_eq!(render_with_locations(&tokens), "3:17 NEWLINE\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }
}
