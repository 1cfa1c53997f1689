//! Documents
//!
//!     A document is an ordered list of items plus the metadata collected from directives.
//!     Directives can appear anywhere; the last value given for a field wins.

use super::declaration::{Abbreviation, AxDef, FreeType, GenDef, GivenType, Schema};
use super::expression::Expr;
use super::proof::ProofTree;
use super::AstNode;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub items: Vec<Item>,
    pub title: Option<TitleMetadata>,
    pub bibliography: Option<Bibliography>,
    pub parts_format: PartsFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Section(Heading),
    Solution(Heading),
    Part(PartLabel),
    Paragraph(Paragraph),
    Latex(RawLatex),
    Predicate(Expr),
    Given(GivenType),
    FreeType(FreeType),
    Abbreviation(Abbreviation),
    Schema(Schema),
    AxDef(AxDef),
    GenDef(GenDef),
    Proof(ProofTree),
}

impl Item {
    pub fn line(&self) -> usize {
        match self {
            Item::Section(h) | Item::Solution(h) => h.line,
            Item::Part(p) => p.line,
            Item::Paragraph(p) => p.line,
            Item::Latex(l) => l.line,
            Item::Predicate(e) => e.line,
            Item::Given(g) => g.line,
            Item::FreeType(f) => f.line,
            Item::Abbreviation(a) => a.line,
            Item::Schema(s) => s.line,
            Item::AxDef(a) => a.line,
            Item::GenDef(g) => g.line,
            Item::Proof(p) => p.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub title: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartLabel {
    pub label: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawLatex {
    pub raw: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bibliography {
    pub file: String,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartsFormat {
    /// Each part label opens a `\subsection*`
    #[default]
    Subsection,
    /// Part labels are run into the text as bold markers
    Inline,
}

impl PartsFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "subsection" => Some(PartsFormat::Subsection),
            "inline" => Some(PartsFormat::Inline),
            _ => None,
        }
    }
}

impl AstNode for Item {
    fn node_type(&self) -> &'static str {
        match self {
            Item::Section(_) => "Section",
            Item::Solution(_) => "Solution",
            Item::Part(_) => "Part",
            Item::Paragraph(_) => "Paragraph",
            Item::Latex(_) => "Latex",
            Item::Predicate(_) => "Predicate",
            Item::Given(_) => "Given",
            Item::FreeType(_) => "FreeType",
            Item::Abbreviation(_) => "Abbreviation",
            Item::Schema(_) => "Schema",
            Item::AxDef(_) => "AxDef",
            Item::GenDef(_) => "GenDef",
            Item::Proof(_) => "Proof",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Item::Section(h) | Item::Solution(h) => h.title.clone(),
            Item::Part(p) => format!("({})", p.label),
            Item::Paragraph(p) => p.text.clone(),
            Item::Latex(l) => l.raw.clone(),
            Item::Predicate(e) => e.display_label(),
            Item::Given(g) => g.names.join(", "),
            Item::FreeType(f) => f.name.clone(),
            Item::Abbreviation(a) => a.name.clone(),
            Item::Schema(s) => s.name.clone(),
            Item::AxDef(_) => String::new(),
            Item::GenDef(g) => format!("[{}]", g.formals.join(", ")),
            Item::Proof(p) => format!("depth {}", p.depth()),
        }
    }
}
