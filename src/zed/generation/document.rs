//! Document assembly
//!
//!     Items are rendered in source order and separated by blank lines. Consecutive zed items
//!     (given sets, free types, abbreviations) are collected first and share one environment.
//!     With `standalone` set the body is wrapped in a complete LaTeX document: class, packages,
//!     title block, and the bibliography at the end.

use super::blocks::{BlockRenderer, ZedParagraph};
use super::dialect::Dialect;
use super::error::GenerationError;
use super::expressions::ExprRenderer;
use super::proofs::ProofRenderer;
use super::prose::{escape_text, render_prose};
use crate::zed::ast::{Document, Item, PartsFormat};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub dialect: Dialect,
    /// Emit `\documentclass` ... `\end{document}` around the body
    pub standalone: bool,
    pub document_class: String,
    pub class_options: Vec<String>,
    pub extra_packages: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            dialect: Dialect::Standard,
            standalone: true,
            document_class: "article".to_string(),
            class_options: Vec::new(),
            extra_packages: Vec::new(),
        }
    }
}

impl GeneratorOptions {
    pub fn new(dialect: Dialect) -> Self {
        GeneratorOptions {
            dialect,
            ..Default::default()
        }
    }

    pub fn body_only(mut self) -> Self {
        self.standalone = false;
        self
    }
}

/// Render a whole document.
pub fn generate(document: &Document, options: &GeneratorOptions) -> Result<String, GenerationError> {
    let generator = Generator::new(options);
    let body = generator.render_items(document)?;
    debug!(
        "generated {} bytes of LaTeX for {} items ({} dialect)",
        body.len(),
        document.items.len(),
        options.dialect
    );

    let mut out = String::new();
    if options.standalone {
        out.push_str(&generator.preamble());
        out.push_str(&title_block(document));
        out.push_str("\\begin{document}\n");
        if document.title.is_some() {
            out.push_str("\\maketitle\n");
        }
        out.push('\n');
    }
    out.push_str(&body);
    if let Some(bibliography) = &document.bibliography {
        out.push_str("\n\n");
        if let Some(style) = &bibliography.style {
            out.push_str(&format!("\\bibliographystyle{{{}}}\n", style));
        }
        out.push_str(&format!("\\bibliography{{{}}}", bibliography.file));
    }
    out.push('\n');
    if options.standalone {
        out.push_str("\n\\end{document}\n");
    }
    Ok(out)
}

struct Generator<'a> {
    options: &'a GeneratorOptions,
    exprs: ExprRenderer,
    blocks: BlockRenderer,
    proofs: ProofRenderer,
}

impl<'a> Generator<'a> {
    fn new(options: &'a GeneratorOptions) -> Self {
        Generator {
            options,
            exprs: ExprRenderer::new(options.dialect),
            blocks: BlockRenderer::new(options.dialect),
            proofs: ProofRenderer::new(options.dialect),
        }
    }

    fn preamble(&self) -> String {
        let mut out = if self.options.class_options.is_empty() {
            format!("\\documentclass{{{}}}\n", self.options.document_class)
        } else {
            format!(
                "\\documentclass[{}]{{{}}}\n",
                self.options.class_options.join(","),
                self.options.document_class
            )
        };
        let packages = self
            .options
            .dialect
            .packages()
            .iter()
            .copied()
            .chain(["proof"])
            .chain(self.options.extra_packages.iter().map(String::as_str));
        for package in packages {
            out.push_str(&format!("\\usepackage{{{}}}\n", package));
        }
        out.push('\n');
        out
    }

    fn render_items(&self, document: &Document) -> Result<String, GenerationError> {
        let d = self.options.dialect;
        let mut chunks = Vec::new();
        let mut zed_run: Vec<ZedParagraph> = Vec::new();

        for item in &document.items {
            let chunk = match item {
                Item::Given(given) => {
                    zed_run.push(ZedParagraph::Given(given));
                    continue;
                }
                Item::FreeType(free) => {
                    zed_run.push(ZedParagraph::FreeType(free));
                    continue;
                }
                Item::Abbreviation(abbrev) => {
                    zed_run.push(ZedParagraph::Abbreviation(abbrev));
                    continue;
                }
                Item::Section(h) => format!("\\section{{{}}}", escape_text(&h.title)),
                Item::Solution(h) => format!("\\section*{{{}}}", escape_text(&h.title)),
                Item::Part(p) => match document.parts_format {
                    PartsFormat::Subsection => format!("\\subsection*{{({})}}", p.label),
                    PartsFormat::Inline => format!("\\noindent\\textbf{{({})}}", p.label),
                },
                Item::Paragraph(p) => render_prose(&p.text, d),
                Item::Latex(l) => l.raw.clone(),
                Item::Predicate(e) => format!("\\[ {} \\]", self.exprs.render(e)?),
                Item::Schema(s) => self.blocks.render_schema(s)?,
                Item::AxDef(a) => self.blocks.render_axdef(a)?,
                Item::GenDef(g) => self.blocks.render_gendef(g)?,
                Item::Proof(p) => self.proofs.render_proof(p)?,
            };
            if !zed_run.is_empty() {
                chunks.push(self.blocks.render_zed_group(&zed_run)?);
                zed_run.clear();
            }
            chunks.push(chunk);
        }
        if !zed_run.is_empty() {
            chunks.push(self.blocks.render_zed_group(&zed_run)?);
        }

        Ok(chunks.join("\n\n"))
    }
}

fn title_block(document: &Document) -> String {
    let Some(meta) = &document.title else {
        return String::new();
    };
    let mut out = String::new();
    if let Some(title) = &meta.title {
        out.push_str(&format!("\\title{{{}}}\n", escape_text(title)));
    }
    if let Some(author) = &meta.author {
        out.push_str(&format!("\\author{{{}}}\n", escape_text(author)));
    }
    if let Some(date) = &meta.date {
        out.push_str(&format!("\\date{{{}}}\n", escape_text(date)));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::parse;

    fn body(source: &str) -> String {
        let doc = parse(tokenize(source)).unwrap();
        generate(&doc, &GeneratorOptions::default().body_only()).unwrap()
    }

    #[test]
    fn test_zed_items_share_an_environment() {
        let out = body("given A, B\nColour ::= red | green\nPair == A cross B\n");
        assert_eq!(out.matches("\\begin{zed}").count(), 1);
        assert_eq!(out.matches("\\also").count(), 2);
    }

    #[test]
    fn test_paragraph_splits_zed_runs() {
        let out = body("given A\nTEXT: Now the colours.\nColour ::= red | green\n");
        assert_eq!(out.matches("\\begin{zed}").count(), 2);
        assert_eq!(out.matches("\\also").count(), 0);
    }

    #[test]
    fn test_standalone_document() {
        let doc = parse(tokenize("TITLE: Notes\nBIBLIOGRAPHY: refs\nx in N\n")).unwrap();
        let mut options = GeneratorOptions::new(Dialect::Fuzz);
        options.class_options = vec!["11pt".into()];
        options.extra_packages = vec!["amsmath".into()];
        let out = generate(&doc, &options).unwrap();
        let expected = [
            "\\documentclass[11pt]{article}",
            "\\usepackage{fuzz}",
            "\\usepackage{proof}",
            "\\usepackage{amsmath}",
            "",
            "\\title{Notes}",
            "",
            "\\begin{document}",
            "\\maketitle",
            "",
            "\\[ x \\in \\nat \\]",
            "",
            "\\bibliography{refs}",
            "",
            "\\end{document}",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_parts_formats() {
        assert_eq!(body("(a)\n"), "\\subsection*{(a)}\n");
        assert_eq!(body("PARTS: inline\n(ii)\n"), "\\noindent\\textbf{(ii)}\n");
    }
}
