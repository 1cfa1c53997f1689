//! Base tokenization using the logos lexer
//!
//! This is the entry point where source strings become raw token streams. It is not a
//! transformation; transformations operate on the stream produced here.

use crate::zed::token::TokenKind;
use logos::Logos;
use std::ops::Range;

/// Tokenize source text into kinds with byte ranges.
///
/// Anything logos rejects is emitted as [TokenKind::Unknown] with the rejected range, so the
/// result always covers every non-whitespace byte of the input.
pub fn tokenize(source: &str) -> Vec<(TokenKind, Range<usize>)> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Unknown);
        tokens.push((kind, lexer.span()));
    }

    tokens
}
