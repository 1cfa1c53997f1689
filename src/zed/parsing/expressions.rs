//! Expression grammar
//!
//!     Precedence climbing over the levels in [precedence]. `parse_level(min)` parses the longest
//!     expression whose binary operators all bind at least as tightly as `min`:
//!
//!         left-associative op at level L:   right operand parsed at L + 1
//!         right-associative op at level L:  right operand parsed at L
//!
//!     Prefix operators (`not`, `#`, unary `-`, prefix functions) and binders are handled before
//!     the binary loop. A binder's body extends as far right as possible, so a quantifier that
//!     is meant to end early has to be parenthesized.
//!
//!     Parentheses only steer the parse. They leave no trace in the AST.

use super::cursor::{ParseResult, Parser};
use super::error::ParserError;
use crate::zed::ast::{
    is_prefix_function, precedence, ApplicationStyle, BinaryOperator, Expr, ExprKind,
    Quantifier, QuantifierKind, SetComprehension, UnaryOperator,
};
use crate::zed::token::TokenKind;

impl Parser {
    /// A full expression, loosest level.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_level(precedence::IFF)
    }

    pub fn parse_level(&mut self, min: u8) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;
        while let Some(op) = BinaryOperator::from_token(self.peek_kind()) {
            if op.precedence() < min {
                break;
            }
            self.advance();
            let (_, right_min) = op.operand_precedence();
            let right = self.parse_level(right_min)?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        if let Some(kind) = QuantifierKind::from_token(token.kind) {
            return self.parse_quantifier(kind);
        }
        let unary = match token.kind {
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Hash => Some(UnaryOperator::Cardinality),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };
        if let Some(op) = unary {
            self.advance();
            let operand = match op {
                UnaryOperator::Not => self.parse_level(precedence::NOT + 1)?,
                _ => self.parse_prefix()?,
            };
            return Ok(Expr::new(
                ExprKind::UnaryOp {
                    op,
                    operand: Box::new(operand),
                },
                token.line,
                token.column,
            ));
        }
        if token.kind == TokenKind::Identifier
            && is_prefix_function(&token.text)
            && self.operand_follows_prefix()
        {
            self.advance();
            let operand = self.parse_prefix()?;
            return Ok(Expr::new(
                ExprKind::FunctionApp {
                    function: Box::new(Expr::identifier(token.text, token.line, token.column)),
                    args: vec![operand],
                    style: ApplicationStyle::Prefix,
                },
                token.line,
                token.column,
            ));
        }
        let primary = self.parse_primary()?;
        Ok(self.parse_postfix(primary))
    }

    /// Whether the token after a prefix function name can start its operand. A prefix name
    /// followed by anything else is an ordinary identifier (`id = R`).
    fn operand_follows_prefix(&self) -> bool {
        matches!(
            self.peek_nth_kind(1),
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LAngle
                | TokenKind::Hash
        )
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> Expr {
        while self.check(TokenKind::Tilde) {
            let tilde = self.advance();
            expr = Expr::new(
                ExprKind::UnaryOp {
                    op: UnaryOperator::Inverse,
                    operand: Box::new(expr),
                },
                tilde.line,
                tilde.column,
            );
        }
        expr
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        let (line, column) = (token.line, token.column);
        let kind = match token.kind {
            TokenKind::Identifier => {
                if self.check_call() {
                    return self.parse_call();
                }
                self.advance();
                ExprKind::Identifier { name: token.text }
            }
            TokenKind::Number => {
                self.advance();
                ExprKind::Number { value: token.text }
            }
            TokenKind::StringLiteral => {
                self.advance();
                let value = token.text.trim_matches('"').to_string();
                ExprKind::Text { value }
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                ExprKind::Boolean {
                    value: token.kind == TokenKind::True,
                }
            }
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBrace => return self.parse_brace_group(),
            TokenKind::LAngle => {
                self.advance();
                let elements = self.parse_list_until(TokenKind::RAngle, precedence::IFF)?;
                self.expect(TokenKind::RAngle, "'⟩' to close the sequence")?;
                ExprKind::SequenceLiteral { elements }
            }
            TokenKind::Less => {
                self.advance();
                // Elements stop short of relations so that `>` closes the literal
                let elements =
                    self.parse_list_until(TokenKind::Greater, precedence::FUNCTION_TYPE)?;
                self.expect(TokenKind::Greater, "'>' to close the sequence")?;
                ExprKind::SequenceLiteral { elements }
            }
            _ => return Err(self.unexpected("an expression")),
        };
        Ok(Expr::new(kind, line, column))
    }

    fn check_call(&self) -> bool {
        self.peek_nth_kind(1) == TokenKind::LParen && self.next_is_adjacent()
    }

    /// `f(x, y)`
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let name = self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        let args = self.parse_list_until(TokenKind::RParen, precedence::IFF)?;
        self.expect(TokenKind::RParen, "')' to close the argument list")?;
        Ok(Expr::new(
            ExprKind::FunctionApp {
                function: Box::new(Expr::identifier(name.text, name.line, name.column)),
                args,
                style: ApplicationStyle::Call,
            },
            name.line,
            name.column,
        ))
    }

    /// `(e)` or the tuple `(a, b)`
    fn parse_parenthesized(&mut self) -> ParseResult<Expr> {
        let open = self.advance();
        let first = self.parse_expr()?;
        if !self.check(TokenKind::Comma) {
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(first);
        }
        let mut elements = vec![first];
        while self.eat(TokenKind::Comma) {
            elements.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RParen, "')' to close the tuple")?;
        Ok(Expr::new(
            ExprKind::Tuple { elements },
            open.line,
            open.column,
        ))
    }

    /// Comma separated expressions at `level`, possibly none, up to `close` (not consumed).
    fn parse_list_until(&mut self, close: TokenKind, level: u8) -> ParseResult<Vec<Expr>> {
        let mut elements = Vec::new();
        if self.check(close) {
            return Ok(elements);
        }
        elements.push(self.parse_level(level)?);
        while self.eat(TokenKind::Comma) {
            elements.push(self.parse_level(level)?);
        }
        Ok(elements)
    }

    /// `{ x : D | P }`, `{ x : D | P . E }`, `{ x : D | P | E }`, `{ x : D . E }`, or a set
    /// literal when the brace does not open with a binding list.
    fn parse_brace_group(&mut self) -> ParseResult<Expr> {
        let open = self.advance();
        if !self.at_binding_list() {
            let elements = self.parse_list_until(TokenKind::RBrace, precedence::IFF)?;
            self.expect(TokenKind::RBrace, "'}' to close the set")?;
            return Ok(Expr::new(
                ExprKind::SetLiteral { elements },
                open.line,
                open.column,
            ));
        }

        let variables = self.identifier_list("a bound variable")?;
        self.expect(TokenKind::Colon, "':' after the bound variables")?;
        let domain = self.parse_expr()?;

        let mut predicate = None;
        let mut expression = None;
        if self.eat(TokenKind::Pipe) {
            predicate = Some(Box::new(self.parse_expr()?));
            if self.eat(TokenKind::Dot) || self.eat(TokenKind::Pipe) {
                expression = Some(Box::new(self.parse_expr()?));
            }
        } else if self.eat(TokenKind::Dot) {
            expression = Some(Box::new(self.parse_expr()?));
        } else if self.check(TokenKind::RBrace) {
            return Err(ParserError::structure(
                "set comprehension needs '| predicate' or '. expression' after its domain",
                self.peek(),
            ));
        }
        self.expect(TokenKind::RBrace, "'}' to close the set comprehension")?;

        Ok(Expr::new(
            ExprKind::SetComprehension(SetComprehension {
                variables,
                domain: Box::new(domain),
                predicate,
                expression,
            }),
            open.line,
            open.column,
        ))
    }

    /// `Q x : D | B`, `Q x : D | C | B` (lowered to `C => B`), `mu x : D | P . E`, `mu x : D . E`
    fn parse_quantifier(&mut self, kind: QuantifierKind) -> ParseResult<Expr> {
        let keyword = self.advance();
        let variables = self.identifier_list("a bound variable")?;
        self.expect(TokenKind::Colon, "':' after the bound variables")?;
        let domain = self.parse_expr()?;

        let (constraint, body) = if kind == QuantifierKind::Mu {
            self.parse_mu_tail()?
        } else {
            if self.check(TokenKind::Dot) {
                return Err(ParserError::typo(
                    format!(
                        "'{}' separates its domain from its body with '|', not '.'",
                        kind.keyword()
                    ),
                    self.peek(),
                ));
            }
            self.expect(TokenKind::Pipe, "'|' after the quantifier domain")?;
            let first = self.parse_expr()?;
            if self.check(TokenKind::Dot) {
                return Err(ParserError::typo(
                    "separate a quantifier constraint from its body with '|', not '.'",
                    self.peek(),
                ));
            }
            let body = if self.eat(TokenKind::Pipe) {
                let second = self.parse_expr()?;
                Expr::binary(BinaryOperator::Implies, first, second)
            } else {
                first
            };
            (None, body)
        };

        Ok(Expr::new(
            ExprKind::Quantifier(Quantifier {
                kind,
                variables,
                domain: Box::new(domain),
                constraint,
                body: Box::new(body),
            }),
            keyword.line,
            keyword.column,
        ))
    }

    fn parse_mu_tail(&mut self) -> ParseResult<(Option<Box<Expr>>, Expr)> {
        if self.eat(TokenKind::Dot) {
            return Ok((None, self.parse_expr()?));
        }
        self.expect(TokenKind::Pipe, "'|' or '.' after the mu domain")?;
        let first = self.parse_expr()?;
        if self.eat(TokenKind::Dot) || self.eat(TokenKind::Pipe) {
            let body = self.parse_expr()?;
            Ok((Some(Box::new(first)), body))
        } else {
            Ok((None, first))
        }
    }
}
