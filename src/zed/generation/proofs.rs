//! Proof rendering
//!
//!     Trees are set with `\infer` from `proof.sty`: conclusion first, premises below, two
//!     spaces of indentation per level so the LaTeX stays readable.
//!
//!     [1] p        becomes  [p]^{1}
//!     :: p         becomes  a bare premise unless it carries a rule or steps of its own
//!     case n = 0:  becomes  an array headed by the case name, its steps below

use super::dialect::Dialect;
use super::error::GenerationError;
use super::expressions::ExprRenderer;
use super::prose::escape_text;
use crate::zed::ast::{CaseAnalysis, ProofNode, ProofStep, ProofTree};
use crate::zed::lexing::tokenize;
use crate::zed::parsing::parse_expression;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Rule names written with logical symbols
static JUSTIFICATION_SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("=>", "\\implies"),
        ("<=>", "\\iff"),
        ("and", "\\land"),
        ("or", "\\lor"),
        ("not", "\\lnot"),
        ("forall", "\\forall"),
        ("exists", "\\exists"),
        ("=", "="),
    ])
});

pub struct ProofRenderer {
    exprs: ExprRenderer,
}

impl ProofRenderer {
    pub fn new(dialect: Dialect) -> Self {
        ProofRenderer {
            exprs: ExprRenderer::new(dialect),
        }
    }

    pub fn render_proof(&self, tree: &ProofTree) -> Result<String, GenerationError> {
        Ok(format!(
            "\\[\n{}\n\\]",
            self.render_node(&tree.conclusion, 0)?
        ))
    }

    fn render_node(&self, node: &ProofNode, level: usize) -> Result<String, GenerationError> {
        let pad = "  ".repeat(level);
        let expression = self.exprs.render(&node.expression)?;
        let formula = match (&node.label, node.is_assumption) {
            (Some(label), true) => format!("[{}]^{{{}}}", expression, label),
            (Some(label), false) => format!("\\textrm{{({})}}\\; {}", escape_text(label), expression),
            (None, _) => expression,
        };

        if node.children.is_empty() && node.justification.is_none() {
            return Ok(format!("{}{}", pad, formula));
        }

        let rule = match &node.justification {
            Some(justification) => format!("[{}]", render_justification(justification)),
            None => String::new(),
        };
        if node.children.is_empty() {
            return Ok(format!("{}\\infer{}{{{}}}{{}}", pad, rule, formula));
        }

        let premises = node
            .children
            .iter()
            .map(|child| self.render_step(child, level + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!(
            "{pad}\\infer{rule}{{{formula}}}{{\n{premises}\n{pad}}}",
            premises = premises.join(&format!("\n{}  &\n", pad)),
        ))
    }

    fn render_step(&self, step: &ProofStep, level: usize) -> Result<String, GenerationError> {
        match step {
            ProofStep::Node(node) => self.render_node(node, level),
            ProofStep::Case(case) => self.render_case(case, level),
        }
    }

    fn render_case(&self, case: &CaseAnalysis, level: usize) -> Result<String, GenerationError> {
        let pad = "  ".repeat(level);
        let heading = format!("{}  \\textbf{{case}}\\ {}:", pad, self.case_name(&case.case_name));
        let mut rows = vec![heading];
        for step in &case.steps {
            rows.push(self.render_node(step, level + 1)?);
        }
        Ok(format!(
            "{pad}\\begin{{array}}{{l}}\n{}\n{pad}\\end{{array}}",
            rows.join(" \\\\\n")
        ))
    }

    fn case_name(&self, name: &str) -> String {
        parse_expression(tokenize(name))
            .ok()
            .and_then(|expr| self.exprs.render(&expr).ok())
            .unwrap_or_else(|| format!("\\textrm{{{}}}", escape_text(name)))
    }
}

/// Rule names: symbols for connectives, roman text for words.
pub fn render_justification(text: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        match JUSTIFICATION_SYMBOLS.get(word) {
            Some(symbol) => {
                if !words.is_empty() {
                    parts.push(format!("\\textrm{{{}}}", escape_text(&words.join(" "))));
                    words.clear();
                }
                parts.push(symbol.to_string());
            }
            None => words.push(word),
        }
    }
    if !words.is_empty() {
        parts.push(format!("\\textrm{{{}}}", escape_text(&words.join(" "))));
    }
    parts.join("\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::parsing::Parser;

    fn render(source: &str) -> String {
        let tree = Parser::new(tokenize(source)).parse_proof().unwrap();
        ProofRenderer::new(Dialect::Standard)
            .render_proof(&tree)
            .unwrap()
    }

    #[test]
    fn test_justifications() {
        assert_eq!(render_justification("=> intro"), "\\implies\\ \\textrm{intro}");
        assert_eq!(render_justification("modus ponens"), "\\textrm{modus ponens}");
        assert_eq!(render_justification("and elim 2"), "\\land\\ \\textrm{elim 2}");
    }

    #[test]
    fn test_single_line_proof() {
        assert_eq!(render("PROOF:\n  p or not p [lem]\n"), "\\[\n\\infer[\\textrm{lem}]{p \\lor \\lnot p}{}\n\\]");
    }

    #[test]
    fn test_nested_inference() {
        let out = render("PROOF:\n  p => q [=> intro]\n    [1] p\n    q [mp]\n      :: p\n      p => q\n");
        let expected = [
            "\\[",
            "\\infer[\\implies\\ \\textrm{intro}]{p \\implies q}{",
            "  [p]^{1}",
            "  &",
            "  \\infer[\\textrm{mp}]{q}{",
            "    p",
            "    &",
            "    p \\implies q",
            "  }",
            "}",
            "\\]",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_restated_hypothesis_keeps_its_steps() {
        let out = render("PROOF:\n  q [mp]\n    :: p [hyp]\n      r\n");
        let expected = [
            "\\[",
            "\\infer[\\textrm{mp}]{q}{",
            "  \\infer[\\textrm{hyp}]{p}{",
            "    r",
            "  }",
            "}",
            "\\]",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_case_array() {
        let out = render("PROOF:\n  p [cases]\n    case n = 0:\n      p [base]\n");
        assert!(out.contains("\\begin{array}{l}"));
        assert!(out.contains("\\textbf{case}\\ n = 0: \\\\\n"));
        assert!(out.contains("\\infer[\\textrm{base}]{p}{}"));
    }
}
