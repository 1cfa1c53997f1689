//! Paragraph-level blocks
//!
//!     Schemas, axiomatic and generic definitions each get their own environment. Given sets,
//!     free types and abbreviations are zed paragraphs: a run of them shares one `zed`
//!     environment with `\also` between the items.

use super::dialect::Dialect;
use super::error::GenerationError;
use super::expressions::ExprRenderer;
use super::identifiers::render_identifier;
use crate::zed::ast::{
    Abbreviation, AxDef, DeclBlock, Declaration, FreeType, GenDef, GivenType, Schema,
};

/// An item that shares a `zed` environment with its neighbours.
#[derive(Debug, Clone, Copy)]
pub enum ZedParagraph<'a> {
    Given(&'a GivenType),
    FreeType(&'a FreeType),
    Abbreviation(&'a Abbreviation),
}

pub struct BlockRenderer {
    dialect: Dialect,
    exprs: ExprRenderer,
}

impl BlockRenderer {
    pub fn new(dialect: Dialect) -> Self {
        BlockRenderer {
            dialect,
            exprs: ExprRenderer::new(dialect),
        }
    }

    pub fn render_schema(&self, schema: &Schema) -> Result<String, GenerationError> {
        let header = format!(
            "\\begin{{schema}}{{{}}}",
            render_identifier(&schema.name, self.dialect)
        );
        self.environment(&header, "schema", &schema.body)
    }

    pub fn render_axdef(&self, axdef: &AxDef) -> Result<String, GenerationError> {
        self.environment("\\begin{axdef}", "axdef", &axdef.body)
    }

    pub fn render_gendef(&self, gendef: &GenDef) -> Result<String, GenerationError> {
        let header = if gendef.formals.is_empty() {
            "\\begin{gendef}".to_string()
        } else {
            format!("\\begin{{gendef}}[{}]", self.names(&gendef.formals))
        };
        self.environment(&header, "gendef", &gendef.body)
    }

    fn environment(
        &self,
        header: &str,
        name: &str,
        body: &DeclBlock,
    ) -> Result<String, GenerationError> {
        let mut lines = vec![header.to_string()];
        lines.extend(self.render_decl_block(body)?);
        lines.push(format!("\\end{{{}}}", name));
        Ok(lines.join("\n"))
    }

    /// Declarations, then `\where` and the predicate groups if there are any.
    pub fn render_decl_block(&self, body: &DeclBlock) -> Result<Vec<String>, GenerationError> {
        let declarations = body
            .declarations
            .iter()
            .map(|d| self.render_declaration(d))
            .collect::<Result<Vec<_>, _>>()?;
        let mut lines = Vec::new();
        if !declarations.is_empty() {
            lines.push(declarations.join(" \\\\\n"));
        }

        if body.has_predicates() {
            lines.push("\\where".to_string());
            let mut groups = Vec::new();
            for group in body.predicate_groups.iter().filter(|g| !g.predicates.is_empty()) {
                let predicates = group
                    .predicates
                    .iter()
                    .map(|p| self.exprs.render(p))
                    .collect::<Result<Vec<_>, _>>()?;
                groups.push(predicates.join(" \\\\\n"));
            }
            lines.push(groups.join("\n\\also\n"));
        }
        Ok(lines)
    }

    fn render_declaration(&self, declaration: &Declaration) -> Result<String, GenerationError> {
        match declaration {
            Declaration::Typed { names, ty, .. } => {
                Ok(format!("{} : {}", self.names(names), self.exprs.render(ty)?))
            }
            Declaration::Include(expr) => self.exprs.render(expr),
        }
    }

    /// One `zed` environment for a run of given sets, free types and abbreviations.
    pub fn render_zed_group(&self, items: &[ZedParagraph]) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let part = match *item {
                ZedParagraph::Given(given) => self.render_given(given)?,
                ZedParagraph::FreeType(free) => self.render_free_type(free)?,
                ZedParagraph::Abbreviation(abbrev) => self.render_abbreviation(abbrev)?,
            };
            parts.push(part);
        }
        Ok(format!(
            "\\begin{{zed}}\n{}\n\\end{{zed}}",
            parts.join("\n\\also\n")
        ))
    }

    pub fn render_given(&self, given: &GivenType) -> Result<String, GenerationError> {
        if given.names.is_empty() {
            return Err(GenerationError::EmptyGiven {
                line: given.line,
                column: given.column,
            });
        }
        Ok(format!("[{}]", self.names(&given.names)))
    }

    pub fn render_free_type(&self, free: &FreeType) -> Result<String, GenerationError> {
        if free.branches.is_empty() {
            return Err(GenerationError::EmptyFreeType {
                name: free.name.clone(),
                line: free.line,
                column: free.column,
            });
        }
        let branches = free
            .branches
            .iter()
            .map(|branch| {
                let name = render_identifier(&branch.name, self.dialect);
                match &branch.parameter {
                    Some(parameter) => Ok(format!(
                        "{} \\ldata {} \\rdata",
                        name,
                        self.exprs.render(parameter)?
                    )),
                    None => Ok(name),
                }
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;
        Ok(format!(
            "{} ::= {}",
            render_identifier(&free.name, self.dialect),
            branches.join(" | ")
        ))
    }

    pub fn render_abbreviation(&self, abbrev: &Abbreviation) -> Result<String, GenerationError> {
        Ok(format!(
            "{} == {}",
            render_identifier(&abbrev.name, self.dialect),
            self.exprs.render(&abbrev.expression)?
        ))
    }

    fn names(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| render_identifier(n, self.dialect))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::Parser;

    fn schema(source: &str) -> String {
        let schema = Parser::new(tokenize(source)).parse_schema().unwrap();
        BlockRenderer::new(Dialect::Standard)
            .render_schema(&schema)
            .unwrap()
    }

    #[test]
    fn test_schema_layout() {
        let out = schema("schema Counter\n  value, limit : N\nwhere\n  value <= limit\nend\n");
        assert_eq!(
            out,
            "\\begin{schema}{Counter}\nvalue, limit : \\mathbb{N}\n\\where\nvalue \\leq limit\n\\end{schema}"
        );
    }

    #[test]
    fn test_groups_are_separated_by_also() {
        let out = schema("schema S\n  x : N\nwhere\n  x > 0\n  x < 9\n\n  x != 4\nend\n");
        assert!(out.contains("x > 0 \\\\\nx < 9\n\\also\n"));
        assert_eq!(out.matches("\\also").count(), 1);
    }

    #[test]
    fn test_schema_without_predicates_has_no_where() {
        let out = schema("schema S\n  x : N\nend\n");
        assert!(!out.contains("\\where"));
    }

    #[test]
    fn test_free_type() {
        let free = Parser::new(tokenize("Tree ::= leaf | node <<Tree cross Tree>>\n"))
            .parse_free_type()
            .unwrap();
        assert_eq!(
            BlockRenderer::new(Dialect::Standard)
                .render_free_type(&free)
                .unwrap(),
            "Tree ::= leaf | node \\ldata Tree \\cross Tree \\rdata"
        );
    }

    #[test]
    fn test_zed_group_joins_with_also() {
        let given = GivenType {
            names: vec!["A".into(), "B".into()],
            line: 1,
            column: 1,
        };
        let free = Parser::new(tokenize("Colour ::= red | green\n"))
            .parse_free_type()
            .unwrap();
        let out = BlockRenderer::new(Dialect::Standard)
            .render_zed_group(&[ZedParagraph::Given(&given), ZedParagraph::FreeType(&free)])
            .unwrap();
        assert_eq!(
            out,
            "\\begin{zed}\n[A, B]\n\\also\nColour ::= red | green\n\\end{zed}"
        );
    }

    #[test]
    fn test_empty_given_is_rejected() {
        let given = GivenType {
            names: vec![],
            line: 2,
            column: 1,
        };
        assert_eq!(
            BlockRenderer::new(Dialect::Fuzz).render_given(&given),
            Err(GenerationError::EmptyGiven { line: 2, column: 1 })
        );
    }
}
