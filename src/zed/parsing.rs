//! Parser
//!
//!     Hand-written recursive descent over the token stream produced by
//!     [tokenize](crate::zed::lexing::tokenize). The grammar is split by concern:
//!
//!         [expressions]    precedence climbing, binders, comprehensions, literals
//!         [declarations]   schema / axdef / gendef blocks, given sets, free types, abbreviations
//!         [proofs]         indentation-structured proof trees
//!         [document]       top-level item dispatch, prose and directives
//!
//!     All of them are `impl` blocks on the one [cursor::Parser], which owns the tokens.
//!     The first error aborts parsing.

pub mod cursor;
pub mod declarations;
pub mod document;
pub mod error;
pub mod expressions;
pub mod proofs;

pub use cursor::Parser;
pub use error::{ParserError, ParserErrorKind};

use crate::zed::ast::{Document, Expr};
use crate::zed::token::Token;
use log::debug;

/// Parse a whole document.
pub fn parse(tokens: Vec<Token>) -> Result<Document, ParserError> {
    let mut parser = Parser::new(tokens);
    let document = parser.parse_document()?;
    debug!("parsed {} items", document.items.len());
    Ok(document)
}

/// Parse a single expression; surrounding line breaks are allowed, anything else is not.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, ParserError> {
    let mut parser = Parser::new(tokens);
    parser.skip_line_breaks();
    let expr = parser.parse_expr()?;
    parser.skip_line_breaks();
    if !parser.at_eof() {
        return Err(parser.unexpected("end of expression"));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        assert!(parse_expression(tokenize("x + y\n")).is_ok());
        let err = parse_expression(tokenize("x + y )")).unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::UnexpectedToken);
        assert_eq!(err.column, 7);
    }

    #[test]
    fn test_empty_expression() {
        let err = parse_expression(tokenize("")).unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(tokenize("\n\n")).unwrap(), Document::default());
    }
}
