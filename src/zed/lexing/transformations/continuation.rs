//! Line continuation
//!
//!     A backslash followed only by whitespace up to the end of the line joins the physical line
//!     with the next one. The base tokenizer always reads `\` as set difference, so `S \ T`
//!     lexes the same wherever it appears. A `SetMinus` directly followed by a `Newline` is a
//!     continuation, and both tokens are dropped. With no `Newline`
//!     between them, the tokens of both physical lines form one logical line for every
//!     downstream grouping decision (predicate groups, proof steps, declarations).

use super::TokenMapper;
use crate::zed::token::{Token, TokenKind};

pub struct ContinuationMapper;

impl ContinuationMapper {
    pub fn new() -> Self {
        ContinuationMapper
    }
}

impl Default for ContinuationMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenMapper for ContinuationMapper {
    fn map(&mut self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            let continues = token.kind == TokenKind::SetMinus
                && iter.peek().map(|t| t.kind) == Some(TokenKind::Newline);
            if continues {
                iter.next();
                continue;
            }
            result.push(token);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::{base_tokenization, materialize};

    #[test]
    fn test_drops_continuations_only() {
        let source = "x = \\\n  y\n";
        let tokens = materialize(source, base_tokenization::tokenize(source));
        let mapped = ContinuationMapper::new().map(tokens);
        let kinds: Vec<TokenKind> = mapped.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Identifier,
                TokenKind::Newline
            ]
        );
        // the continued token keeps its physical position
        assert_eq!((mapped[2].line, mapped[2].column), (2, 3));
    }

    #[test]
    fn test_set_minus_inside_a_line_is_kept() {
        let source = "S \\ T\n";
        let tokens = materialize(source, base_tokenization::tokenize(source));
        let kinds: Vec<TokenKind> = ContinuationMapper::new()
            .map(tokens)
            .iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::SetMinus,
                TokenKind::Identifier,
                TokenKind::Newline
            ]
        );
    }
}
