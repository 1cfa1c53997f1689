//! Testing utilities
//!
//! Two tools for parser and generator tests:
//!
//! 1. **Factories** build expected ASTs without spelling out positions. Positions take no part
//!    in expression equality, so a factory-built tree compares equal to a parsed one:
//!
//! ```rust-example
//! use zedtex::zed::testing::*;
//!
//! let expected = bin(BinaryOperator::Cross, bin(BinaryOperator::Cross, id("A"), id("B")), id("C"));
//! assert_eq!(parse_expr_str("A cross B cross C"), expected);
//! ```
//!
//! 2. **[assert_doc]** checks the shape of a parsed document with a fluent API, one closure per
//!    item, and reports the item summary on failure:
//!
//! ```rust-example
//! assert_doc(&doc)
//!     .item_count(2)
//!     .item(0, |item| item.is_schema("State").predicate_groups(1))
//!     .item(1, |item| item.is_given(&["A", "B"]));
//! ```

use crate::zed::ast::{
    AstNode, BinaryOperator, Document, Expr, ExprKind, Item, QuantifierKind, UnaryOperator,
};
use crate::zed::ast::{ApplicationStyle, Quantifier, SetComprehension};
use crate::zed::lexing::tokenize;
use crate::zed::parsing::{parse, parse_expression};

pub use crate::zed::ast::{BinaryOperator as Op, QuantifierKind as Q};

// ============================================================================
// Factories
// ============================================================================

fn at(kind: ExprKind) -> Expr {
    Expr::new(kind, 0, 0)
}

pub fn id(name: &str) -> Expr {
    Expr::identifier(name, 0, 0)
}

pub fn num(value: u64) -> Expr {
    at(ExprKind::Number {
        value: value.to_string(),
    })
}

pub fn boolean(value: bool) -> Expr {
    at(ExprKind::Boolean { value })
}

pub fn text(value: &str) -> Expr {
    at(ExprKind::Text {
        value: value.to_string(),
    })
}

pub fn bin(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

pub fn unary(op: UnaryOperator, operand: Expr) -> Expr {
    at(ExprKind::UnaryOp {
        op,
        operand: Box::new(operand),
    })
}

pub fn not(operand: Expr) -> Expr {
    unary(UnaryOperator::Not, operand)
}

pub fn set(elements: Vec<Expr>) -> Expr {
    at(ExprKind::SetLiteral { elements })
}

pub fn seq(elements: Vec<Expr>) -> Expr {
    at(ExprKind::SequenceLiteral { elements })
}

pub fn tuple(elements: Vec<Expr>) -> Expr {
    at(ExprKind::Tuple { elements })
}

/// `name arg`, e.g. `P X` or `dom R`
pub fn prefix(name: &str, arg: Expr) -> Expr {
    at(ExprKind::FunctionApp {
        function: Box::new(id(name)),
        args: vec![arg],
        style: ApplicationStyle::Prefix,
    })
}

/// `name(args)`
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    at(ExprKind::FunctionApp {
        function: Box::new(id(name)),
        args,
        style: ApplicationStyle::Call,
    })
}

pub fn quant(kind: QuantifierKind, vars: &[&str], domain: Expr, body: Expr) -> Expr {
    at(ExprKind::Quantifier(Quantifier {
        kind,
        variables: vars.iter().map(|v| v.to_string()).collect(),
        domain: Box::new(domain),
        constraint: None,
        body: Box::new(body),
    }))
}

pub fn mu(vars: &[&str], domain: Expr, constraint: Option<Expr>, body: Expr) -> Expr {
    at(ExprKind::Quantifier(Quantifier {
        kind: QuantifierKind::Mu,
        variables: vars.iter().map(|v| v.to_string()).collect(),
        domain: Box::new(domain),
        constraint: constraint.map(Box::new),
        body: Box::new(body),
    }))
}

pub fn comprehension(
    vars: &[&str],
    domain: Expr,
    predicate: Option<Expr>,
    expression: Option<Expr>,
) -> Expr {
    at(ExprKind::SetComprehension(SetComprehension {
        variables: vars.iter().map(|v| v.to_string()).collect(),
        domain: Box::new(domain),
        predicate: predicate.map(Box::new),
        expression: expression.map(Box::new),
    }))
}

// ============================================================================
// Parsing shortcuts
// ============================================================================

/// Parse one expression, panicking with the parser's message on failure.
pub fn parse_expr_str(source: &str) -> Expr {
    match parse_expression(tokenize(source)) {
        Ok(expr) => expr,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    }
}

/// Parse a document, panicking with the parser's message on failure.
pub fn parse_doc_str(source: &str) -> Document {
    match parse(tokenize(source)) {
        Ok(doc) => doc,
        Err(err) => panic!("failed to parse document: {}\n{}", err, source),
    }
}

// ============================================================================
// Document assertions
// ============================================================================

pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.doc.items.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {} items: [{}]",
            expected,
            actual,
            summarize_items(&self.doc.items)
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ItemAssertion<'a>) -> ItemAssertion<'a>,
    {
        assert!(
            index < self.doc.items.len(),
            "Item index {} out of bounds (document has {} items)",
            index,
            self.doc.items.len()
        );
        assertion(ItemAssertion {
            item: &self.doc.items[index],
            context: format!("items[{}]", index),
        });
        self
    }
}

pub struct ItemAssertion<'a> {
    item: &'a Item,
    context: String,
}

impl<'a> ItemAssertion<'a> {
    fn expect_type(&self, node_type: &str) {
        assert_eq!(
            self.item.node_type(),
            node_type,
            "{}: expected {}, found {} ({})",
            self.context,
            node_type,
            self.item.node_type(),
            self.item.display_label()
        );
    }

    pub fn is_schema(self, name: &str) -> Self {
        self.expect_type("Schema");
        assert_eq!(self.item.display_label(), name, "{}: schema name", self.context);
        self
    }

    pub fn is_given(self, names: &[&str]) -> Self {
        self.expect_type("Given");
        if let Item::Given(g) = self.item {
            assert_eq!(g.names, names, "{}: given names", self.context);
        }
        self
    }

    pub fn is_paragraph(self, text: &str) -> Self {
        self.expect_type("Paragraph");
        assert_eq!(self.item.display_label(), text, "{}: paragraph text", self.context);
        self
    }

    pub fn is_predicate(self, expected: &Expr) -> Self {
        self.expect_type("Predicate");
        if let Item::Predicate(e) = self.item {
            assert_eq!(e, expected, "{}: predicate", self.context);
        }
        self
    }

    pub fn is_proof(self) -> Self {
        self.expect_type("Proof");
        self
    }

    pub fn has_type(self, node_type: &str) -> Self {
        self.expect_type(node_type);
        self
    }

    /// Number of blank-line separated predicate groups in a schema, axdef or gendef body
    pub fn predicate_groups(self, expected: usize) -> Self {
        let body = match self.item {
            Item::Schema(s) => &s.body,
            Item::AxDef(a) => &a.body,
            Item::GenDef(g) => &g.body,
            other => panic!(
                "{}: {} has no declaration block",
                self.context,
                other.node_type()
            ),
        };
        assert_eq!(
            body.predicate_groups.len(),
            expected,
            "{}: predicate groups",
            self.context
        );
        self
    }

    pub fn proof_depth(self, expected: usize) -> Self {
        match self.item {
            Item::Proof(p) => assert_eq!(p.depth(), expected, "{}: proof depth", self.context),
            other => panic!("{}: expected Proof, found {}", self.context, other.node_type()),
        }
        self
    }
}

fn summarize_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| item.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}
