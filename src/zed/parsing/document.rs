//! Document grammar
//!
//!     A document is a sequence of items, each starting at the beginning of a logical line. The
//!     first tokens of the line decide what the item is:
//!
//!         schema / axdef / gendef        declaration block up to `end`
//!         given A, B                     given sets
//!         Name ::= ...                   free type
//!         Name == ...                    abbreviation
//!         PROOF:                         proof tree
//!         TEXT:                          paragraphs of prose
//!         TITLE: AUTHOR: DATE: ...       metadata directives
//!         LATEX:                         raw passthrough
//!         === Title ===  /  ** Title **  section and solution headings
//!         (a)                            part label
//!
//!     Anything else is a bare predicate.

use super::cursor::{ParseResult, Parser};
use super::error::ParserError;
use crate::zed::ast::{
    Bibliography, Document, Heading, Item, PartLabel, PartsFormat, Paragraph, RawLatex,
    TitleMetadata,
};
use crate::zed::lexing::transformations::is_part_label;
use crate::zed::token::{Token, TokenKind};
use log::warn;

/// Metadata collected while items are parsed; directives may appear anywhere.
#[derive(Default)]
struct Metadata {
    title: TitleMetadata,
    bibliography: Option<String>,
    bib_style: Option<String>,
    parts_format: PartsFormat,
}

impl Parser {
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let mut items = Vec::new();
        let mut meta = Metadata::default();

        loop {
            self.skip_line_breaks();
            if self.at_eof() {
                break;
            }
            self.parse_item(&mut items, &mut meta)?;
        }

        let has_title =
            meta.title.title.is_some() || meta.title.author.is_some() || meta.title.date.is_some();
        if meta.bibliography.is_none() && meta.bib_style.is_some() {
            warn!("BIBSTYLE given without BIBLIOGRAPHY; ignoring it");
        }
        Ok(Document {
            items,
            title: has_title.then_some(meta.title),
            bibliography: meta.bibliography.map(|file| Bibliography {
                file,
                style: meta.bib_style,
            }),
            parts_format: meta.parts_format,
        })
    }

    fn parse_item(&mut self, items: &mut Vec<Item>, meta: &mut Metadata) -> ParseResult<()> {
        let first = self.peek_kind();
        let second = self.peek_nth_kind(1);

        let item = match (first, second) {
            (TokenKind::Schema, _) => Item::Schema(self.parse_schema()?),
            (TokenKind::AxDef, _) => Item::AxDef(self.parse_axdef()?),
            (TokenKind::GenDef, _) => Item::GenDef(self.parse_gendef()?),
            (TokenKind::Given, _) => Item::Given(self.parse_given()?),
            (TokenKind::Proof, _) => Item::Proof(self.parse_proof()?),
            (TokenKind::Text, TokenKind::Colon) => {
                items.extend(self.parse_text_block()?.into_iter().map(Item::Paragraph));
                return Ok(());
            }
            (kind, TokenKind::Colon) if kind.is_directive() => {
                if let Some(item) = self.parse_directive(meta)? {
                    items.push(item);
                }
                return Ok(());
            }
            (TokenKind::HeadingMarker, _) => Item::Section(self.parse_heading()?),
            (TokenKind::SolutionMarker, _) => Item::Solution(self.parse_heading()?),
            (TokenKind::LParen, TokenKind::Identifier) if self.at_part_label() => {
                Item::Part(self.parse_part_label()?)
            }
            (TokenKind::Identifier, TokenKind::Defines) => Item::FreeType(self.parse_free_type()?),
            (TokenKind::Identifier, TokenKind::DefinedAs) => {
                Item::Abbreviation(self.parse_abbreviation()?)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect_line_end()?;
                Item::Predicate(expr)
            }
        };
        items.push(item);
        Ok(())
    }

    /// `TEXT:` followed by prose lines. Blank lines separate paragraphs.
    fn parse_text_block(&mut self) -> ParseResult<Vec<Paragraph>> {
        self.expect(TokenKind::Text, "'TEXT'")?;
        self.expect(TokenKind::Colon, "':' after TEXT")?;

        let mut paragraphs = Vec::new();
        let mut lines: Vec<Token> = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Prose => lines.push(self.advance()),
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::BlankLine => {
                    self.advance();
                    flush_paragraph(&mut lines, &mut paragraphs);
                }
                _ => break,
            }
        }
        flush_paragraph(&mut lines, &mut paragraphs);
        Ok(paragraphs)
    }

    fn parse_directive(&mut self, meta: &mut Metadata) -> ParseResult<Option<Item>> {
        let directive = self.advance();
        self.expect(TokenKind::Colon, "':'")?;
        let value = if self.check(TokenKind::Prose) {
            self.advance().text
        } else {
            return Err(ParserError::structure(
                format!("'{}:' needs a value", directive.text),
                &directive,
            ));
        };
        self.expect_line_end()?;

        match directive.kind {
            TokenKind::Title => meta.title.title = Some(value),
            TokenKind::Author => meta.title.author = Some(value),
            TokenKind::Date => meta.title.date = Some(value),
            TokenKind::Bibliography => meta.bibliography = Some(value),
            TokenKind::BibStyle => meta.bib_style = Some(value),
            TokenKind::Parts => {
                meta.parts_format = PartsFormat::from_name(&value).ok_or_else(|| {
                    ParserError::structure(
                        format!("PARTS must be 'subsection' or 'inline', found '{}'", value),
                        &directive,
                    )
                })?
            }
            TokenKind::Latex => {
                return Ok(Some(Item::Latex(RawLatex {
                    raw: value,
                    line: directive.line,
                    column: directive.column,
                })))
            }
            _ => return Err(ParserError::unexpected("a directive", &directive)),
        }
        Ok(None)
    }

    /// `=== Title ===` or `** Title **`; the closing marker is gone after prose capture.
    fn parse_heading(&mut self) -> ParseResult<Heading> {
        let marker = self.advance();
        let title = self.expect(TokenKind::Prose, "a heading title")?;
        self.expect_line_end()?;
        Ok(Heading {
            title: title.text,
            line: marker.line,
            column: marker.column,
        })
    }

    fn at_part_label(&self) -> bool {
        self.peek_nth_kind(2) == TokenKind::RParen
            && self.peek_nth_kind(3).is_line_end()
            && is_part_label(&self.peek_nth(1).text)
    }

    fn parse_part_label(&mut self) -> ParseResult<PartLabel> {
        let open = self.expect(TokenKind::LParen, "'('")?;
        let label = self.expect_identifier("a part label")?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect_line_end()?;
        Ok(PartLabel {
            label: label.text,
            line: open.line,
            column: open.column,
        })
    }
}

fn flush_paragraph(lines: &mut Vec<Token>, paragraphs: &mut Vec<Paragraph>) {
    let Some(first) = lines.first() else {
        return;
    };
    let text = lines
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    paragraphs.push(Paragraph {
        text,
        line: first.line,
        column: first.column,
    });
    lines.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::ParserErrorKind;

    fn parse(source: &str) -> Document {
        Parser::new(tokenize(source)).parse_document().unwrap()
    }

    fn types(doc: &Document) -> Vec<&'static str> {
        use crate::zed::ast::AstNode;
        doc.items.iter().map(|i| i.node_type()).collect()
    }

    #[test]
    fn test_item_dispatch() {
        let doc = parse(
            "given A, B\nColour ::= red | green\nPair == A cross B\nx in A\n(a)\n=== Intro ===\n** Answer **\n",
        );
        assert_eq!(
            types(&doc),
            vec!["Given", "FreeType", "Abbreviation", "Predicate", "Part", "Section", "Solution"]
        );
    }

    #[test]
    fn test_text_block_paragraphs() {
        let doc = parse("TEXT: First line\nstill first.\n\nSecond one.\ngiven A\n");
        assert_eq!(types(&doc), vec!["Paragraph", "Paragraph", "Given"]);
        match &doc.items[0] {
            Item::Paragraph(p) => assert_eq!(p.text, "First line\nstill first."),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_directives_fill_metadata() {
        let doc = parse(
            "TITLE: Sets & Relations\nAUTHOR: A. Student\nBIBLIOGRAPHY: refs\nBIBSTYLE: plain\nPARTS: inline\nLATEX: \\newpage\n",
        );
        let title = doc.title.unwrap();
        assert_eq!(title.title.as_deref(), Some("Sets & Relations"));
        assert_eq!(title.author.as_deref(), Some("A. Student"));
        assert_eq!(title.date, None);
        let bib = doc.bibliography.unwrap();
        assert_eq!((bib.file.as_str(), bib.style.as_deref()), ("refs", Some("plain")));
        assert_eq!(doc.parts_format, PartsFormat::Inline);
        assert_eq!(
            doc.items,
            vec![Item::Latex(RawLatex {
                raw: "\\newpage".into(),
                line: 6,
                column: 1
            })]
        );
    }

    #[test]
    fn test_bad_parts_format() {
        let err = Parser::new(tokenize("PARTS: columns\n"))
            .parse_document()
            .unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::Structure);
    }

    #[test]
    fn test_parenthesized_predicate_is_not_a_part() {
        let doc = parse("(x) = y\n(ab)\n");
        assert_eq!(types(&doc), vec!["Predicate", "Predicate"]);
    }
}
