//! Treeviz formatter for the AST
//!
//! One line per node, children below their parent with box-drawing connectors, so the shape
//! of a parse is visible at a glance:
//!
//!     ⧉ 3 items
//!     ├─ ▭ State
//!     │ ├─ : x
//!     │ │ └─ ○ N
//!     │ └─ ⊢ <
//!     │   ├─ ○ x
//!     │   └─ ○ 9
//!     └─ ∴ depth 2
//!
//! Icons
//!     Document ⧉  Section §  Solution ✓  Part ◦  Paragraph ¶  Latex ℒ
//!     Schema ▭  AxDef ▯  GenDef ▱  Given [  FreeType ::  Abbreviation ≙
//!     Predicate ⊢  Proof ∴  Case ⋎  Assumption ⌜  Declaration :
//!     everything else ○

use crate::zed::ast::{
    AstNode, CaseAnalysis, DeclBlock, Declaration, Document, Expr, ExprKind, Item, ProofNode,
    ProofStep,
};
use std::collections::HashMap;

/// A uniform view of any node, used for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AstSnapshot {
    pub node_type: String,
    pub label: String,
    pub line: usize,
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    fn new(node_type: &str, label: impl Into<String>, line: usize) -> Self {
        AstSnapshot {
            node_type: node_type.to_string(),
            label: label.into(),
            line,
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children = children;
        self
    }
}

pub fn snapshot_from_document(doc: &Document) -> AstSnapshot {
    AstSnapshot::new("Document", format!("{} items", doc.items.len()), 1)
        .with_children(doc.items.iter().map(snapshot_item).collect())
}

fn snapshot_item(item: &Item) -> AstSnapshot {
    let node = AstSnapshot::new(item.node_type(), item.display_label(), item.line());
    let children = match item {
        Item::Predicate(expr) => return snapshot_expr(expr).relabelled("Predicate"),
        Item::Schema(s) => snapshot_block(&s.body),
        Item::AxDef(a) => snapshot_block(&a.body),
        Item::GenDef(g) => snapshot_block(&g.body),
        Item::FreeType(f) => f
            .branches
            .iter()
            .map(|b| {
                AstSnapshot::new("Branch", b.name.clone(), b.line)
                    .with_children(b.parameter.iter().map(snapshot_expr).collect())
            })
            .collect(),
        Item::Abbreviation(a) => vec![snapshot_expr(&a.expression)],
        Item::Proof(p) => vec![snapshot_proof_node(&p.conclusion)],
        Item::Section(_)
        | Item::Solution(_)
        | Item::Part(_)
        | Item::Paragraph(_)
        | Item::Latex(_)
        | Item::Given(_) => Vec::new(),
    };
    node.with_children(children)
}

fn snapshot_block(body: &DeclBlock) -> Vec<AstSnapshot> {
    let mut children: Vec<AstSnapshot> = body
        .declarations
        .iter()
        .map(|d| match d {
            Declaration::Typed { names, ty, line, .. } => {
                AstSnapshot::new("Declaration", names.join(", "), *line)
                    .with_children(vec![snapshot_expr(ty)])
            }
            Declaration::Include(expr) => snapshot_expr(expr).relabelled("Declaration"),
        })
        .collect();
    for group in &body.predicate_groups {
        children.extend(
            group
                .predicates
                .iter()
                .map(|p| snapshot_expr(p).relabelled("Predicate")),
        );
    }
    children
}

fn snapshot_expr(expr: &Expr) -> AstSnapshot {
    let node = AstSnapshot::new(expr.node_type(), expr.display_label(), expr.line);
    let children: Vec<AstSnapshot> = match &expr.kind {
        ExprKind::Identifier { .. }
        | ExprKind::Number { .. }
        | ExprKind::Boolean { .. }
        | ExprKind::Text { .. } => Vec::new(),
        ExprKind::BinaryOp { left, right, .. } => vec![snapshot_expr(left), snapshot_expr(right)],
        ExprKind::UnaryOp { operand, .. } => vec![snapshot_expr(operand)],
        ExprKind::Quantifier(q) => std::iter::once(q.domain.as_ref())
            .chain(q.constraint.as_deref())
            .chain(std::iter::once(q.body.as_ref()))
            .map(snapshot_expr)
            .collect(),
        ExprKind::SetComprehension(c) => std::iter::once(c.domain.as_ref())
            .chain(c.predicate.as_deref())
            .chain(c.expression.as_deref())
            .map(snapshot_expr)
            .collect(),
        ExprKind::SetLiteral { elements }
        | ExprKind::SequenceLiteral { elements }
        | ExprKind::Tuple { elements } => elements.iter().map(snapshot_expr).collect(),
        ExprKind::FunctionApp { args, .. } => args.iter().map(snapshot_expr).collect(),
    };
    node.with_children(children)
}

fn snapshot_proof_node(node: &ProofNode) -> AstSnapshot {
    let mut children = vec![snapshot_expr(&node.expression)];
    children.extend(node.children.iter().map(|step| match step {
        ProofStep::Node(child) => snapshot_proof_node(child),
        ProofStep::Case(case) => snapshot_case(case),
    }));
    AstSnapshot::new(node.node_type(), node.display_label(), node.line).with_children(children)
}

fn snapshot_case(case: &CaseAnalysis) -> AstSnapshot {
    AstSnapshot::new(case.node_type(), case.display_label(), case.line)
        .with_children(case.steps.iter().map(snapshot_proof_node).collect())
}

impl AstSnapshot {
    fn relabelled(mut self, node_type: &str) -> Self {
        self.label = format!("{} {}", self.node_type, self.label);
        self.node_type = node_type.to_string();
        self
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.chars().count() > max_chars || first_line.len() < s.len() {
        let mut truncated = first_line.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        first_line.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Section" => "§",
        "Solution" => "✓",
        "Part" => "◦",
        "Paragraph" => "¶",
        "Latex" => "ℒ",
        "Schema" => "▭",
        "AxDef" => "▯",
        "GenDef" => "▱",
        "Given" => "[",
        "FreeType" => "::",
        "Abbreviation" => "≙",
        "Predicate" => "⊢",
        "Proof" => "∴",
        "Case" => "⋎",
        "Assumption" => "⌜",
        "Declaration" => ":",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let linum = if show_linum {
        format!("{:02} ", snapshot.line)
    } else {
        String::new()
    };
    let mut output = format!(
        "{}{}{} {} {}\n",
        linum,
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i + 1 == count, show_linum));
    }
    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Supported params: `show-linum` prefixes each line with its source line number.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let snapshot = snapshot_from_document(doc);
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i + 1 == count, show_linum));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::lexing::tokenize;
    use crate::zed::parsing::parse;

    fn treeviz(source: &str) -> String {
        to_treeviz_str(&parse(tokenize(source)).unwrap())
    }

    #[test]
    fn test_predicate_tree() {
        let out = treeviz("x in S union T\n");
        assert_eq!(
            out,
            "⧉ 1 items\n└─ ⊢ BinaryOp in\n  ├─ ○ x\n  └─ ○ union\n    ├─ ○ S\n    └─ ○ T\n"
        );
    }

    #[test]
    fn test_schema_tree() {
        let out = treeviz("schema S\n  x : N\nwhere\n  x > 0\nend\ngiven A\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "⧉ 2 items");
        assert_eq!(lines[1], "├─ ▭ S");
        assert_eq!(lines[2], "│ ├─ : x");
        assert_eq!(lines[3], "│ │ └─ ○ N");
        assert_eq!(lines[4], "│ └─ ⊢ BinaryOp >");
        assert_eq!(lines.last(), Some(&"└─ [ A"));
    }

    #[test]
    fn test_line_numbers() {
        let doc = parse(tokenize("\n\ngiven A\n")).unwrap();
        let params = HashMap::from([("show-linum".to_string(), "true".to_string())]);
        let out = to_treeviz_str_with_params(&doc, &params);
        assert_eq!(out.lines().nth(1), Some("03 └─ [ A"));
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("line one\nline two", 30), "line one...");
        assert_eq!(truncate(&"a".repeat(35), 30), format!("{}...", "a".repeat(30)));
    }
}
