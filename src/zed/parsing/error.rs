//! Parser errors
//!
//!     The first error aborts the parse. Every error carries the position of the token that
//!     triggered it and a message written for the person at the whiteboard, not for the parser's
//!     author: "expected ':' after the variable list, found '|'" rather than a token kind dump.

use crate::zed::token::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorKind {
    UnexpectedToken,
    UnexpectedEnd,
    /// A character the tokenizer could not classify
    UnknownCharacter,
    /// A common misspelling with a known correction
    Typo,
    /// A malformed block or proof
    Structure,
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserErrorKind::UnexpectedToken => "unexpected token",
            ParserErrorKind::UnexpectedEnd => "unexpected end of input",
            ParserErrorKind::UnknownCharacter => "unknown character",
            ParserErrorKind::Typo => "typo",
            ParserErrorKind::Structure => "malformed structure",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}: {message}")]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParserError {
    pub fn new(kind: ParserErrorKind, message: impl Into<String>, at: &Token) -> Self {
        ParserError {
            kind,
            message: message.into(),
            line: at.line,
            column: at.column,
        }
    }

    /// Error for finding `found` where `expected` should be.
    pub fn unexpected(expected: &str, found: &Token) -> Self {
        let kind = match found.kind {
            TokenKind::Eof => ParserErrorKind::UnexpectedEnd,
            TokenKind::Unknown => ParserErrorKind::UnknownCharacter,
            _ => ParserErrorKind::UnexpectedToken,
        };
        let message = match found.kind {
            TokenKind::Unknown => format!("unrecognized character '{}'", found.text),
            _ => format!("expected {}, found {}", expected, describe(found)),
        };
        ParserError::new(kind, message, found)
    }

    pub fn typo(message: impl Into<String>, at: &Token) -> Self {
        ParserError::new(ParserErrorKind::Typo, message, at)
    }

    pub fn structure(message: impl Into<String>, at: &Token) -> Self {
        ParserError::new(ParserErrorKind::Structure, message, at)
    }

    /// Errors that originate in the tokenizer rather than the grammar.
    pub fn is_lexical(&self) -> bool {
        self.kind == ParserErrorKind::UnknownCharacter
    }
}

/// How a token is named in messages.
pub fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::BlankLine => "blank line".to_string(),
        TokenKind::Prose => "text".to_string(),
        _ => format!("'{}'", token.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_classifies_by_found_token() {
        let eof = Token::new(TokenKind::Eof, "", 3, 1);
        assert_eq!(
            ParserError::unexpected("expression", &eof).kind,
            ParserErrorKind::UnexpectedEnd
        );
        let unknown = Token::new(TokenKind::Unknown, "@", 1, 4);
        let err = ParserError::unexpected("expression", &unknown);
        assert!(err.is_lexical());
        assert_eq!(err.message, "unrecognized character '@'");
    }

    #[test]
    fn test_display_includes_position() {
        let tok = Token::new(TokenKind::Pipe, "|", 2, 7);
        let err = ParserError::unexpected("':'", &tok);
        assert_eq!(
            err.to_string(),
            "unexpected token at line 2, column 7: expected ':', found '|'"
        );
    }
}
