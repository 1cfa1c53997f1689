//! Declaration grammar
//!
//!     Paragraph items that introduce names:
//!
//!         schema Name          axdef          gendef [X, Y]
//!           declarations         ...            ...
//!         where                end            end
//!           predicates
//!         end
//!
//!         given A, B
//!         Name ::= A | B <<T>>
//!         Name == expr
//!
//!     Declaration lines hold one or more `;`-separated declarations. Predicate lines after
//!     `where` are grouped by blank lines; a run of blank lines is one boundary.

use super::cursor::{ParseResult, Parser};
use super::error::ParserError;
use crate::zed::ast::{
    Abbreviation, AxDef, DeclBlock, Declaration, FreeBranch, FreeType, GenDef, GivenType,
    PredicateGroup, Schema,
};
use crate::zed::token::TokenKind;

impl Parser {
    pub fn parse_schema(&mut self) -> ParseResult<Schema> {
        let keyword = self.expect(TokenKind::Schema, "'schema'")?;
        let name = self.expect_identifier("a schema name")?.text;
        self.expect_line_end()?;
        let body = self.parse_decl_block("schema")?;
        Ok(Schema {
            name,
            body,
            line: keyword.line,
            column: keyword.column,
        })
    }

    pub fn parse_axdef(&mut self) -> ParseResult<AxDef> {
        let keyword = self.expect(TokenKind::AxDef, "'axdef'")?;
        self.expect_line_end()?;
        let body = self.parse_decl_block("axdef")?;
        Ok(AxDef {
            body,
            line: keyword.line,
            column: keyword.column,
        })
    }

    pub fn parse_gendef(&mut self) -> ParseResult<GenDef> {
        let keyword = self.expect(TokenKind::GenDef, "'gendef'")?;
        let mut formals = Vec::new();
        if self.eat(TokenKind::LBracket) {
            formals = self.identifier_list("a formal parameter")?;
            self.expect(TokenKind::RBracket, "']' to close the formal parameters")?;
        }
        self.expect_line_end()?;
        let body = self.parse_decl_block("gendef")?;
        Ok(GenDef {
            formals,
            body,
            line: keyword.line,
            column: keyword.column,
        })
    }

    /// Everything after a block header, up to and including `end`.
    fn parse_decl_block(&mut self, block: &str) -> ParseResult<DeclBlock> {
        let mut body = DeclBlock::default();

        loop {
            self.skip_line_breaks();
            match self.peek_kind() {
                TokenKind::Where | TokenKind::End => break,
                TokenKind::Eof => return Err(self.unterminated(block)),
                _ => {}
            }
            body.declarations.push(self.parse_declaration()?);
            while self.eat(TokenKind::Semicolon) {
                body.declarations.push(self.parse_declaration()?);
            }
            self.expect_line_end()?;
        }

        if self.eat(TokenKind::Where) {
            self.expect_line_end()?;
            let mut group = PredicateGroup::default();
            loop {
                let blank = self.skip_line_breaks();
                if blank && !group.predicates.is_empty() {
                    body.predicate_groups.push(std::mem::take(&mut group));
                }
                match self.peek_kind() {
                    TokenKind::End => break,
                    TokenKind::Eof => return Err(self.unterminated(block)),
                    _ => {}
                }
                group.predicates.push(self.parse_expr()?);
                self.expect_line_end()?;
            }
            if !group.predicates.is_empty() {
                body.predicate_groups.push(group);
            }
        }

        self.expect(TokenKind::End, "'end'")?;
        self.expect_line_end()?;
        Ok(body)
    }

    fn unterminated(&self, block: &str) -> ParserError {
        ParserError::structure(format!("{} block is missing its 'end'", block), self.peek())
    }

    /// `x, y : T` or an included schema expression
    fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        if self.at_binding_list() {
            let first = self.peek().clone();
            let names = self.identifier_list("a declared name")?;
            self.expect(TokenKind::Colon, "':'")?;
            let ty = self.parse_expr()?;
            Ok(Declaration::Typed {
                names,
                ty,
                line: first.line,
                column: first.column,
            })
        } else {
            Ok(Declaration::Include(self.parse_expr()?))
        }
    }

    pub fn parse_given(&mut self) -> ParseResult<GivenType> {
        let keyword = self.expect(TokenKind::Given, "'given'")?;
        let names = self.identifier_list("a given set name")?;
        self.expect_line_end()?;
        Ok(GivenType {
            names,
            line: keyword.line,
            column: keyword.column,
        })
    }

    /// `Name ::= A | B <<T>>`
    pub fn parse_free_type(&mut self) -> ParseResult<FreeType> {
        let name = self.expect_identifier("a free type name")?;
        let defines = self.expect(TokenKind::Defines, "'::='")?;
        if self.check(TokenKind::Equals) || self.check(TokenKind::DefinedAs) {
            return Err(ParserError::typo(
                "found '::==', free types are defined with '::='",
                &defines,
            ));
        }

        let mut branches = vec![self.parse_free_branch()?];
        while self.eat(TokenKind::Pipe) {
            branches.push(self.parse_free_branch()?);
        }
        self.expect_line_end()?;

        Ok(FreeType {
            name: name.text,
            branches,
            line: name.line,
            column: name.column,
        })
    }

    fn parse_free_branch(&mut self) -> ParseResult<FreeBranch> {
        let name = self.expect_identifier("a constructor name")?;
        let parameter = if self.eat(TokenKind::LData) {
            let parameter = self.parse_expr()?;
            self.expect(TokenKind::RData, "'>>' to close the constructor argument")?;
            Some(parameter)
        } else {
            None
        };
        Ok(FreeBranch {
            name: name.text,
            parameter,
            line: name.line,
            column: name.column,
        })
    }

    /// `Name == expr`
    pub fn parse_abbreviation(&mut self) -> ParseResult<Abbreviation> {
        let name = self.expect_identifier("an abbreviation name")?;
        self.expect(TokenKind::DefinedAs, "'=='")?;
        let expression = self.parse_expr()?;
        self.expect_line_end()?;
        Ok(Abbreviation {
            name: name.text,
            expression,
            line: name.line,
            column: name.column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::ast::ExprKind;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::ParserErrorKind;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize(source))
    }

    #[test]
    fn test_schema_with_groups() {
        let source = "schema State\n  x, y : N\n  s : P N\nwhere\n  x < y\n  x in s\n\n\n  y in s\nend\n";
        let schema = parser(source).parse_schema().unwrap();
        assert_eq!(schema.name, "State");
        assert_eq!(schema.body.declarations.len(), 2);
        let sizes: Vec<usize> = schema
            .body
            .predicate_groups
            .iter()
            .map(|g| g.predicates.len())
            .collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn test_semicolon_declarations_and_includes() {
        let source = "schema Op\n  State; x? : N\nend\n";
        let schema = parser(source).parse_schema().unwrap();
        assert!(matches!(schema.body.declarations[0], Declaration::Include(_)));
        match &schema.body.declarations[1] {
            Declaration::Typed { names, .. } => assert_eq!(names, &vec!["x?".to_string()]),
            other => panic!("{:?}", other),
        }
        assert!(schema.body.predicate_groups.is_empty());
    }

    #[test]
    fn test_gendef_formals() {
        let source = "gendef [X, Y]\n  first : X cross Y --> X\nend\n";
        let gendef = parser(source).parse_gendef().unwrap();
        assert_eq!(gendef.formals, vec!["X", "Y"]);
    }

    #[test]
    fn test_missing_end() {
        let err = parser("axdef\n  n : N\n").parse_axdef().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::Structure);
        assert!(err.message.contains("'end'"));
    }

    #[test]
    fn test_free_type_branches_in_order() {
        let free = parser("Tree ::= leaf | node <<Tree cross Tree>>\n")
            .parse_free_type()
            .unwrap();
        let names: Vec<&str> = free.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["leaf", "node"]);
        assert!(free.branches[0].parameter.is_none());
        assert!(free.branches[1].parameter.is_some());
    }

    #[test]
    fn test_double_equals_typo() {
        let err = parser("Colour ::== red | green\n")
            .parse_free_type()
            .unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::Typo);
        assert!(err.message.contains("'::='"));
    }

    #[test]
    fn test_given_and_abbreviation() {
        assert_eq!(
            parser("given NAME, ADDR\n").parse_given().unwrap().names,
            vec!["NAME", "ADDR"]
        );
        let abbrev = parser("Pair == N cross N\n").parse_abbreviation().unwrap();
        assert_eq!(abbrev.name, "Pair");
        assert!(matches!(abbrev.expression.kind, ExprKind::BinaryOp { .. }));
    }
}
