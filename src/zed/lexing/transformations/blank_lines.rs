//! Blank line detection
//!
//!     Logos emits one `Newline` per line break. A newline that closes a line with content is
//!     the end of a logical line; a newline that closes an empty (or whitespace-only) line is a
//!     blank line. Blank lines separate predicate groups in declaration blocks and paragraphs in
//!     TEXT blocks, so they are first-class tokens from here on.
//!
//!     Consecutive empty lines produce consecutive `BlankLine` tokens. Collapsing runs is the
//!     parser's business.

use super::TokenMapper;
use crate::zed::token::{Token, TokenKind};

pub struct BlankLineMapper;

impl BlankLineMapper {
    pub fn new() -> Self {
        BlankLineMapper
    }
}

impl Default for BlankLineMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenMapper for BlankLineMapper {
    fn map(&mut self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut at_line_start = true;

        for mut token in tokens {
            if token.kind == TokenKind::Newline {
                if at_line_start {
                    token.kind = TokenKind::BlankLine;
                }
                at_line_start = true;
            } else {
                at_line_start = false;
            }
            result.push(token);
        }

        result
    }
}
