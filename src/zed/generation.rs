//! LaTeX generation
//!
//!     The generator walks a parsed [Document](crate::zed::ast::Document) and produces LaTeX for
//!     the `zed-csp` or `fuzz` packages. It never changes the tree and it never fails on anything
//!     the parser builds: a [GenerationError] means the AST broke one of the parser's
//!     guarantees.
//!
//!     [expressions]  operators, binders, parenthesization by precedence
//!     [identifiers]  subscripts and `\mathit` names
//!     [blocks]       schema, axdef, gendef and zed environments
//!     [proofs]       `\infer` trees
//!     [prose]        paragraph text with inline math detection
//!     [document]     item order, zed consolidation, preamble and title

pub mod blocks;
pub mod dialect;
pub mod document;
pub mod error;
pub mod expressions;
pub mod identifiers;
pub mod proofs;
pub mod prose;

pub use dialect::Dialect;
pub use document::{generate, GeneratorOptions};
pub use error::GenerationError;
pub use expressions::generate_expression;
