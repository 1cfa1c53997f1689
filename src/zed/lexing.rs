//! Lexer
//!
//!     This module orchestrates the complete tokenization pipeline for the whiteboard notation.
//!     Tokenization never fails: characters logos does not recognize become `Unknown` tokens and
//!     the parser decides what to do with them.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using logos. See [base_tokenization]. Produces kinds with byte
//!        ranges; horizontal whitespace is skipped.
//!
//!     2. Materialization. Byte ranges are turned into 1-based line/column positions and every
//!        token records the leading-whitespace width of its physical line.
//!
//!     3. Transformations, run in order (see [transformations]):
//!         - Line continuation: `\` at the end of a line joins it with the next one.
//!         - Blank lines: the first newline after content stays a `Newline`, every further
//!           empty line becomes a `BlankLine`.
//!         - Prose capture: TEXT blocks, headings and directive values become single `Prose`
//!           tokens holding the original text.
//!
//!     4. A final `Eof` token.
//!
//!     The order matters: continuations must be gone before blank lines are counted, otherwise
//!     the newline eaten by a continuation would look like the end of a logical line.

pub mod base_tokenization;
pub mod transformations;

use crate::zed::token::{Token, TokenKind};
use log::trace;
use std::ops::Range;
use transformations::{BlankLineMapper, ContinuationMapper, ProseCaptureMapper, TokenMapper};

/// Tab stops count as this many columns of indentation
pub const TAB_WIDTH: usize = 4;

/// Run the complete lexing pipeline.
pub fn tokenize(source: &str) -> Vec<Token> {
    let raw = base_tokenization::tokenize(source);
    let mut tokens = materialize(source, raw);

    tokens = ContinuationMapper::new().map(tokens);
    tokens = BlankLineMapper::new().map(tokens);
    tokens = ProseCaptureMapper::new(source).map(tokens);

    let index = LineIndex::new(source);
    let (line, column) = index.position(source.len());
    let mut eof = Token::new(TokenKind::Eof, "", line, column);
    eof.span = source.len()..source.len();
    tokens.push(eof);

    trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    tokens
}

/// Turn raw logos output into positioned tokens.
pub fn materialize(source: &str, raw: Vec<(TokenKind, Range<usize>)>) -> Vec<Token> {
    let index = LineIndex::new(source);
    raw.into_iter()
        .map(|(kind, span)| {
            let (line, column) = index.position(span.start);
            Token {
                kind,
                text: source[span.clone()].to_string(),
                line,
                column,
                indent: index.indent(line),
                span,
            }
        })
        .collect()
}

/// Byte offset to line/column lookup.
pub struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { source, starts }
    }

    /// 1-based line and column (in characters) of a byte offset
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.starts[line];
        let column = self.source[start..offset].chars().count() + 1;
        (line + 1, column)
    }

    /// Leading whitespace width of a 1-based line
    pub fn indent(&self, line: usize) -> usize {
        let start = self.starts[line - 1];
        self.source[start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_positions_and_indent() {
        let tokens = tokenize("a\n    b = c\n");
        let b = &tokens[2];
        assert_eq!(b.text, "b");
        assert_eq!((b.line, b.column, b.indent), (2, 5, 4));
        let c = &tokens[4];
        assert_eq!((c.line, c.column, c.indent), (2, 9, 4));
    }

    #[test]
    fn test_tab_indent_width() {
        let tokens = tokenize("\tx\n");
        assert_eq!(tokens[0].indent, TAB_WIDTH);
    }

    #[test]
    fn test_ends_with_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(
            kinds("x"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_blank_lines_between_content() {
        assert_eq!(
            kinds("a\n\n\nb\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::BlankLine,
                TokenKind::BlankLine,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_continuation_is_not_a_line_end() {
        assert_eq!(
            kinds("a and \\\n    b\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        let tokens = tokenize("x @ y");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "@");
    }
}
