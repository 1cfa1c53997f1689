//! Expressions
//!
//!     One node type covers terms, predicates and schema expressions. The grammar does not
//!     separate them (`x in S` is as much an expression as `S cross T`), and neither does the
//!     generator: it only needs an operator and a precedence to lay a node out.
//!
//!     Positions are carried for diagnostics and take no part in equality. Two expressions are
//!     equal when they have the same shape, wherever they came from, which is what lets a
//!     reprinted expression compare equal to the one it was printed from.

use super::operators::{precedence, BinaryOperator, QuantifierKind, UnaryOperator};
use super::AstNode;

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: usize,
    pub column: usize,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier {
        name: String,
    },
    Number {
        value: String,
    },
    Boolean {
        value: bool,
    },
    /// String literal, quotes stripped
    Text {
        value: String,
    },
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Quantifier(Quantifier),
    SetComprehension(SetComprehension),
    SetLiteral {
        elements: Vec<Expr>,
    },
    SequenceLiteral {
        elements: Vec<Expr>,
    },
    Tuple {
        elements: Vec<Expr>,
    },
    FunctionApp {
        function: Box<Expr>,
        args: Vec<Expr>,
        style: ApplicationStyle,
    },
}

/// How an application was written, which is also how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStyle {
    /// `P X`, `dom R`: a known prefix function and one operand
    Prefix,
    /// `f(x, y)`: an identifier immediately followed by a parenthesized argument list
    Call,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    pub variables: Vec<String>,
    pub domain: Box<Expr>,
    /// Only `mu` keeps its constraint; the other binders lower it into the body.
    pub constraint: Option<Box<Expr>>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetComprehension {
    pub variables: Vec<String>,
    pub domain: Box<Expr>,
    pub predicate: Option<Box<Expr>>,
    pub expression: Option<Box<Expr>>,
}

impl Expr {
    pub fn new(kind: ExprKind, line: usize, column: usize) -> Self {
        Expr { kind, line, column }
    }

    pub fn identifier(name: impl Into<String>, line: usize, column: usize) -> Self {
        Expr::new(ExprKind::Identifier { name: name.into() }, line, column)
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        let (line, column) = (left.line, left.column);
        Expr::new(
            ExprKind::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            line,
            column,
        )
    }

    /// Binding strength of this node as it would be laid out without parentheses.
    pub fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::BinaryOp { op, .. } => op.precedence(),
            ExprKind::UnaryOp { op, .. } => op.precedence(),
            ExprKind::Quantifier(_) => precedence::BINDER,
            ExprKind::FunctionApp {
                style: ApplicationStyle::Prefix,
                ..
            } => precedence::APPLICATION,
            _ => precedence::ATOM,
        }
    }

    pub fn is_atom(&self) -> bool {
        self.precedence() == precedence::ATOM
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

impl AstNode for Expr {
    fn node_type(&self) -> &'static str {
        match &self.kind {
            ExprKind::Identifier { .. } => "Identifier",
            ExprKind::Number { .. } => "Number",
            ExprKind::Boolean { .. } => "Boolean",
            ExprKind::Text { .. } => "Text",
            ExprKind::BinaryOp { .. } => "BinaryOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::Quantifier(_) => "Quantifier",
            ExprKind::SetComprehension(_) => "SetComprehension",
            ExprKind::SetLiteral { .. } => "SetLiteral",
            ExprKind::SequenceLiteral { .. } => "SequenceLiteral",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::FunctionApp { .. } => "FunctionApp",
        }
    }

    fn display_label(&self) -> String {
        match &self.kind {
            ExprKind::Identifier { name } => name.clone(),
            ExprKind::Number { value } => value.clone(),
            ExprKind::Boolean { value } => value.to_string(),
            ExprKind::Text { value } => format!("\"{}\"", value),
            ExprKind::BinaryOp { op, .. } => op.symbol().to_string(),
            ExprKind::UnaryOp { op, .. } => op.symbol().to_string(),
            ExprKind::Quantifier(q) => format!("{} {}", q.kind.keyword(), q.variables.join(", ")),
            ExprKind::SetComprehension(c) => format!("{{ {} }}", c.variables.join(", ")),
            ExprKind::SetLiteral { elements } => format!("{} elements", elements.len()),
            ExprKind::SequenceLiteral { elements } => format!("{} elements", elements.len()),
            ExprKind::Tuple { elements } => format!("{} components", elements.len()),
            ExprKind::FunctionApp { function, args, .. } => {
                format!("{} ({} args)", function.display_label(), args.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_positions() {
        let a = Expr::identifier("x", 1, 1);
        let b = Expr::identifier("x", 7, 12);
        assert_eq!(a, b);
        assert_ne!(a, Expr::identifier("y", 1, 1));
    }

    #[test]
    fn test_precedence_of_nodes() {
        let x = Expr::identifier("x", 1, 1);
        let sum = Expr::binary(BinaryOperator::Plus, x.clone(), x.clone());
        assert_eq!(sum.precedence(), precedence::ADDITIVE);
        assert!(x.is_atom());
        let call = Expr::new(
            ExprKind::FunctionApp {
                function: Box::new(Expr::identifier("f", 1, 1)),
                args: vec![x.clone()],
                style: ApplicationStyle::Call,
            },
            1,
            1,
        );
        assert!(call.is_atom());
    }
}
