//! Proof trees
//!
//!     A proof is written conclusion first, with the steps that justify each line indented below
//!     it. That is already a tree: a node's children are the lines indented under it, in source
//!     order. Case analyses are a second kind of child whose steps are the lines under the
//!     `case name:` header.

use super::expression::Expr;
use super::AstNode;

#[derive(Debug, Clone, PartialEq)]
pub struct ProofTree {
    pub conclusion: ProofNode,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProofNode {
    pub expression: Expr,
    pub justification: Option<String>,
    pub label: Option<String>,
    pub children: Vec<ProofStep>,
    /// Discharged hypothesis, `[n] expr`
    pub is_assumption: bool,
    /// Restated hypothesis, `:: expr`
    pub is_sibling: bool,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProofStep {
    Node(ProofNode),
    Case(CaseAnalysis),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseAnalysis {
    pub case_name: String,
    pub steps: Vec<ProofNode>,
    pub line: usize,
    pub column: usize,
}

impl ProofTree {
    pub fn depth(&self) -> usize {
        self.conclusion.depth()
    }
}

impl ProofNode {
    pub fn new(expression: Expr) -> Self {
        let (line, column) = (expression.line, expression.column);
        ProofNode {
            expression,
            justification: None,
            label: None,
            children: Vec::new(),
            is_assumption: false,
            is_sibling: false,
            line,
            column,
        }
    }

    /// Number of nodes on the longest path down from this one, this one included.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ProofStep::depth).max().unwrap_or(0)
    }
}

impl ProofStep {
    pub fn depth(&self) -> usize {
        match self {
            ProofStep::Node(node) => node.depth(),
            ProofStep::Case(case) => case.depth(),
        }
    }
}

impl CaseAnalysis {
    /// An empty case contributes nothing to the height of the tree.
    pub fn depth(&self) -> usize {
        self.steps.iter().map(ProofNode::depth).max().unwrap_or(0)
    }
}

impl AstNode for ProofNode {
    fn node_type(&self) -> &'static str {
        if self.is_assumption {
            "Assumption"
        } else if self.is_sibling {
            "Sibling"
        } else {
            "ProofNode"
        }
    }

    fn display_label(&self) -> String {
        match &self.justification {
            Some(j) => format!("[{}]", j),
            None => String::new(),
        }
    }
}

impl AstNode for CaseAnalysis {
    fn node_type(&self) -> &'static str {
        "Case"
    }

    fn display_label(&self) -> String {
        self.case_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> ProofNode {
        ProofNode::new(Expr::identifier(name, 1, 1))
    }

    #[test]
    fn test_depth_counts_longest_path() {
        let mut root = leaf("p");
        let mut mid = leaf("q");
        mid.children.push(ProofStep::Node(leaf("r")));
        root.children.push(ProofStep::Node(leaf("s")));
        root.children.push(ProofStep::Node(mid));
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_empty_case_has_depth_zero() {
        let case = CaseAnalysis {
            case_name: "empty".into(),
            steps: vec![],
            line: 1,
            column: 1,
        };
        assert_eq!(case.depth(), 0);
        let mut root = leaf("p");
        root.children.push(ProofStep::Case(case));
        assert_eq!(root.depth(), 1);
    }
}
