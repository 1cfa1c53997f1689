//! Declarations: schemas, axiomatic and generic definitions, and the zed paragraph items
//! (given sets, free types, abbreviations).

use super::expression::Expr;

/// One line of a declaration section.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `x, y : T`
    Typed {
        names: Vec<String>,
        ty: Expr,
        line: usize,
        column: usize,
    },
    /// A schema reference or other schema expression included by name
    Include(Expr),
}

/// Predicates separated by blank lines in the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredicateGroup {
    pub predicates: Vec<Expr>,
}

/// Body shared by schemas, axiomatic and generic definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclBlock {
    pub declarations: Vec<Declaration>,
    pub predicate_groups: Vec<PredicateGroup>,
}

impl DeclBlock {
    pub fn has_predicates(&self) -> bool {
        self.predicate_groups.iter().any(|g| !g.predicates.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    pub body: DeclBlock,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxDef {
    pub body: DeclBlock,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenDef {
    pub formals: Vec<String>,
    pub body: DeclBlock,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GivenType {
    pub names: Vec<String>,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeBranch {
    pub name: String,
    /// Constructor argument, `<<T>>`
    pub parameter: Option<Expr>,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeType {
    pub name: String,
    pub branches: Vec<FreeBranch>,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Abbreviation {
    pub name: String,
    pub expression: Expr,
    pub line: usize,
    pub column: usize,
}
