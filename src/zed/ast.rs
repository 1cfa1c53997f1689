//! Abstract syntax tree
//!
//!     The AST is the contract between the parser and the generator. Every node is built once by
//!     the parser and never mutated afterwards; the generator only borrows it. Nodes are plain
//!     owned values, one tree per [Document].
//!
//!     All sum types are closed: adding a variant forces every `match` in the parser, the
//!     generator and the formats to be revisited.

pub mod declaration;
pub mod document;
pub mod expression;
pub mod operators;
pub mod proof;

pub use declaration::{
    Abbreviation, AxDef, DeclBlock, Declaration, FreeBranch, FreeType, GenDef, GivenType,
    PredicateGroup, Schema,
};
pub use document::{
    Bibliography, Document, Heading, Item, PartLabel, PartsFormat, Paragraph, RawLatex,
    TitleMetadata,
};
pub use expression::{ApplicationStyle, Expr, ExprKind, Quantifier, SetComprehension};
pub use operators::{
    is_prefix_function, precedence, Associativity, BinaryOperator, QuantifierKind, UnaryOperator,
};
pub use proof::{CaseAnalysis, ProofNode, ProofStep, ProofTree};

/// Common interface for labelling nodes in tree views
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}
