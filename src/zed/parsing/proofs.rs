//! Proof grammar
//!
//!     PROOF:
//!       x > 1 => x > 0 [=> intro]
//!         [1] x > 1
//!         x > 0 [arith]
//!           :: x > 1
//!           case x = 2:
//!             x > 0 [subst]
//!
//!     The first line is the conclusion; every following line attaches to the nearest line
//!     above it with a smaller indentation. Lines are read one at a time onto a stack of
//!     `(indent, frame)` pairs. A new line pops every frame indented at least as deeply and
//!     attaches it to the frame below, then pushes itself.
//!
//!     Line forms:
//!         [n] expr           assumption discharged by a later step, label n
//!         [label] expr       labelled step
//!         :: expr            restated hypothesis (sibling)
//!         case name:         case analysis; the lines under it are its steps
//!         expr [text]        any step may end with its justification
//!
//!     The proof ends at the first line that is not indented deeper than the conclusion.

use super::cursor::{ParseResult, Parser};
use super::error::ParserError;
use crate::zed::ast::{CaseAnalysis, ProofNode, ProofStep, ProofTree};
use crate::zed::token::{detokenize, Token, TokenKind};

enum Frame {
    Node(ProofNode),
    Case(CaseAnalysis),
}

impl Parser {
    pub fn parse_proof(&mut self) -> ParseResult<ProofTree> {
        let keyword = self.expect(TokenKind::Proof, "'PROOF'")?;
        self.expect(TokenKind::Colon, "':' after PROOF")?;
        self.expect_line_end()?;

        let mut stack: Vec<(usize, Frame)> = Vec::new();
        let mut root_indent = None;

        loop {
            self.skip_line_breaks();
            let indent = self.peek().indent;
            if self.at_eof() || indent == 0 || root_indent.is_some_and(|root| indent <= root) {
                break;
            }

            let start = self.peek().clone();
            let frame = self.parse_proof_line()?;

            if root_indent.is_none() {
                match &frame {
                    Frame::Node(node) if !node.is_sibling && !node.is_assumption => {}
                    _ => {
                        return Err(ParserError::structure(
                            "a proof starts with its conclusion",
                            &start,
                        ))
                    }
                }
                root_indent = Some(indent);
                stack.push((indent, frame));
                continue;
            }

            while let Some((top, _)) = stack.last() {
                if *top < indent {
                    break;
                }
                if let Some((_, done)) = stack.pop() {
                    attach(&mut stack, done)?;
                }
            }
            if let (Frame::Case(_), Some((_, Frame::Case(_)))) = (&frame, stack.last()) {
                return Err(ParserError::structure(
                    "a case analysis must sit under a proof step",
                    &start,
                ));
            }
            stack.push((indent, frame));
        }

        while stack.len() > 1 {
            if let Some((_, done)) = stack.pop() {
                attach(&mut stack, done)?;
            }
        }
        match stack.pop() {
            Some((_, Frame::Node(conclusion))) => Ok(ProofTree {
                conclusion,
                line: keyword.line,
                column: keyword.column,
            }),
            _ => Err(ParserError::structure(
                "PROOF: needs at least one indented line",
                &keyword,
            )),
        }
    }

    fn parse_proof_line(&mut self) -> ParseResult<Frame> {
        let start = self.peek().clone();

        if start.kind == TokenKind::Case {
            self.advance();
            let rest: Vec<Token> = self.rest_of_line().to_vec();
            let name = match rest.split_last() {
                Some((last, name)) if last.kind == TokenKind::Colon && !name.is_empty() => {
                    join_tokens(name)
                }
                _ => return Err(self.unexpected("'case name:'")),
            };
            for _ in 0..rest.len() {
                self.advance();
            }
            self.expect_line_end()?;
            return Ok(Frame::Case(CaseAnalysis {
                case_name: name,
                steps: Vec::new(),
                line: start.line,
                column: start.column,
            }));
        }

        let mut label = None;
        let mut is_assumption = false;
        let mut is_sibling = false;
        if self.eat(TokenKind::DoubleColon) {
            is_sibling = true;
        } else if self.eat(TokenKind::LBracket) {
            let inner = self.bracketed()?;
            is_assumption = inner.len() == 1 && inner[0].kind == TokenKind::Number;
            label = Some(join_tokens(&inner));
        }

        let expression = self.parse_expr()?;
        let justification = if self.eat(TokenKind::LBracket) {
            Some(join_tokens(&self.bracketed()?))
        } else {
            None
        };
        self.expect_line_end()?;

        let mut node = ProofNode::new(expression);
        node.justification = justification;
        node.label = label;
        node.is_assumption = is_assumption;
        node.is_sibling = is_sibling;
        node.line = start.line;
        node.column = start.column;
        Ok(Frame::Node(node))
    }

    /// Tokens up to the closing `]`, which is consumed. The opening `[` already is.
    fn bracketed(&mut self) -> ParseResult<Vec<Token>> {
        let mut inner = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(inner);
                }
                kind if kind.is_line_end() => return Err(self.unexpected("']'")),
                _ => inner.push(self.advance()),
            }
        }
    }
}

fn attach(stack: &mut [(usize, Frame)], child: Frame) -> ParseResult<()> {
    let Some((_, parent)) = stack.last_mut() else {
        return Ok(());
    };
    match (parent, child) {
        (Frame::Node(parent), Frame::Node(node)) => parent.children.push(ProofStep::Node(node)),
        (Frame::Node(parent), Frame::Case(case)) => parent.children.push(ProofStep::Case(case)),
        (Frame::Case(parent), Frame::Node(node)) => parent.steps.push(node),
        (Frame::Case(_), Frame::Case(case)) => {
            let at = Token::new(TokenKind::Case, "case", case.line, case.column);
            return Err(ParserError::structure(
                "a case analysis must sit under a proof step",
                &at,
            ));
        }
    }
    Ok(())
}

fn join_tokens(tokens: &[Token]) -> String {
    detokenize(tokens).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::ParserErrorKind;

    fn proof(source: &str) -> ProofTree {
        Parser::new(tokenize(source)).parse_proof().unwrap()
    }

    fn node(step: &ProofStep) -> &ProofNode {
        match step {
            ProofStep::Node(node) => node,
            ProofStep::Case(case) => panic!("case {}", case.case_name),
        }
    }

    #[test]
    fn test_nesting_follows_indentation() {
        let tree = proof("PROOF:\n  p and q [and intro]\n    p [assumption]\n    q\n");
        let root = &tree.conclusion;
        assert_eq!(root.justification.as_deref(), Some("and intro"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(node(&root.children[0]).justification.as_deref(), Some("assumption"));
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_assumptions_labels_and_siblings() {
        let tree = proof("PROOF:\n  p => q [=> intro]\n    [1] p\n    q\n      :: p\n      [lemma] r\n");
        let root = &tree.conclusion;
        let assumption = node(&root.children[0]);
        assert!(assumption.is_assumption);
        assert_eq!(assumption.label.as_deref(), Some("1"));
        let q = node(&root.children[1]);
        assert!(node(&q.children[0]).is_sibling);
        let labelled = node(&q.children[1]);
        assert!(!labelled.is_assumption);
        assert_eq!(labelled.label.as_deref(), Some("lemma"));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_case_analysis() {
        let tree = proof(
            "PROOF:\n  p [cases]\n    case n = 0:\n      p [base]\n    case n > 0:\n      p [step]\n      q\n",
        );
        let root = &tree.conclusion;
        assert_eq!(root.children.len(), 2);
        match &root.children[1] {
            ProofStep::Case(case) => {
                assert_eq!(case.case_name, "n > 0");
                assert_eq!(case.steps.len(), 2);
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_empty_case() {
        let tree = proof("PROOF:\n  p\n    case none:\n");
        match &tree.conclusion.children[0] {
            ProofStep::Case(case) => assert!(case.steps.is_empty()),
            other => panic!("{:?}", other),
        }
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_proof_ends_at_unindented_line() {
        let mut parser = Parser::new(tokenize("PROOF:\n  p\n    q\nx = 1\n"));
        let tree = parser.parse_proof().unwrap();
        assert_eq!(tree.conclusion.children.len(), 1);
        assert_eq!(parser.peek().text, "x");
    }

    #[test]
    fn test_empty_proof_is_an_error() {
        let err = Parser::new(tokenize("PROOF:\n\nx\n")).parse_proof().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::Structure);
    }

    #[test]
    fn test_unclosed_justification() {
        let err = Parser::new(tokenize("PROOF:\n  p [oops\n"))
            .parse_proof()
            .unwrap_err();
        assert!(err.message.contains("']'"));
    }
}
