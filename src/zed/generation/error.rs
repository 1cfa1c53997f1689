use thiserror::Error;

/// The AST handed to the generator broke a rule the parser always upholds.
///
/// The parser never builds these shapes, so seeing one means the tree was assembled by hand or
/// by another tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("set comprehension at line {line}, column {column} has neither a predicate nor an expression")]
    EmptyComprehension { line: usize, column: usize },
    #[error("given set declaration at line {line}, column {column} names no sets")]
    EmptyGiven { line: usize, column: usize },
    #[error("free type '{name}' at line {line}, column {column} has no branches")]
    EmptyFreeType {
        name: String,
        line: usize,
        column: usize,
    },
    #[error("{construct} at line {line}, column {column} binds no variables")]
    NoBoundVariables {
        construct: &'static str,
        line: usize,
        column: usize,
    },
}
