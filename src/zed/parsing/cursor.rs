//! Token cursor
//!
//!     The parser walks a token vector with one index. Everything here is bookkeeping shared by
//!     the grammar modules: lookahead, consuming with expectations, and line structure.
//!
//!     The vector always ends with `Eof`, and the cursor never moves past it, so `peek` is total.

use super::error::ParserError;
use crate::zed::token::{Token, TokenKind};

pub type ParseResult<T> = Result<T, ParserError>;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.end_column()))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }
        Parser { tokens, pos: 0 }
    }

    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn peek_nth_kind(&self, n: usize) -> TokenKind {
        self.peek_nth(n).kind
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    pub fn expect_identifier(&mut self, what: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Identifier, what)
    }

    /// `a, b, c`
    pub fn identifier_list(&mut self, what: &str) -> ParseResult<Vec<String>> {
        let mut names = vec![self.expect_identifier(what)?.text];
        while self.eat(TokenKind::Comma) {
            names.push(self.expect_identifier(what)?.text);
        }
        Ok(names)
    }

    /// True when the tokens ahead are `ident (, ident)* :`.
    pub fn at_binding_list(&self) -> bool {
        let mut n = 0;
        loop {
            if self.peek_nth_kind(n) != TokenKind::Identifier {
                return false;
            }
            match self.peek_nth_kind(n + 1) {
                TokenKind::Comma => n += 2,
                TokenKind::Colon => return true,
                _ => return false,
            }
        }
    }

    pub fn unexpected(&self, expected: &str) -> ParserError {
        ParserError::unexpected(expected, self.peek())
    }

    pub fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn at_line_end(&self) -> bool {
        self.peek_kind().is_line_end()
    }

    /// Consume the end of the current logical line. Blank lines that follow stay in place.
    pub fn expect_line_end(&mut self) -> ParseResult<()> {
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::BlankLine | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    /// Skip newlines and blank lines; returns whether any blank line was skipped.
    pub fn skip_line_breaks(&mut self) -> bool {
        let mut saw_blank = false;
        loop {
            match self.peek_kind() {
                TokenKind::Newline => {}
                TokenKind::BlankLine => saw_blank = true,
                _ => return saw_blank,
            }
            self.advance();
        }
    }

    /// Tokens up to (not including) the end of the current line.
    pub fn rest_of_line(&self) -> &[Token] {
        let start = self.pos;
        let end = self.tokens[start..]
            .iter()
            .position(|t| t.kind.is_line_end())
            .map(|i| start + i)
            .unwrap_or(self.tokens.len());
        &self.tokens[start..end]
    }

    /// True when the next token begins right where the current one ends.
    pub fn next_is_adjacent(&self) -> bool {
        self.peek().span.end == self.peek_nth(1).span.start && !self.peek().span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;

    #[test]
    fn test_never_moves_past_eof() {
        let mut p = Parser::new(tokenize("x"));
        assert_eq!(p.advance().text, "x");
        assert!(p.at_eof());
        p.advance();
        assert!(p.at_eof());
    }

    #[test]
    fn test_appends_missing_eof() {
        let p = Parser::new(Vec::new());
        assert!(p.at_eof());
    }

    #[test]
    fn test_binding_list_lookahead() {
        assert!(Parser::new(tokenize("x, y : N")).at_binding_list());
        assert!(!Parser::new(tokenize("x, y }")).at_binding_list());
        assert!(!Parser::new(tokenize("1 : N")).at_binding_list());
    }

    #[test]
    fn test_adjacency() {
        assert!(Parser::new(tokenize("f(x)")).next_is_adjacent());
        assert!(!Parser::new(tokenize("f (x)")).next_is_adjacent());
    }
}
