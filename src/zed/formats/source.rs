//! Whiteboard source printer
//!
//!     Prints an expression back as whiteboard text that the parser reads as the same tree. It
//!     uses the same slot rule as the LaTeX renderer, with the operand rule of the standard
//!     dialect for prefix functions.
//!
//!     A few spellings are chosen for how they lex rather than how they look:
//!     - sequences use `⟨ ⟩`, so `<` never has to be told apart from a sequence opener;
//!     - top-level binders inside a binder header are parenthesized, since their body would
//!       otherwise run on past the `|` or `.` that ends the header;
//!     - a negation used as a prefix-function operand is parenthesized, because `P -x` reads
//!       as a subtraction.

use crate::zed::ast::{
    precedence, ApplicationStyle, Expr, ExprKind, Quantifier, QuantifierKind, SetComprehension,
    UnaryOperator,
};

pub fn expr_to_source(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Identifier { name } => name.clone(),
        ExprKind::Number { value } => value.clone(),
        ExprKind::Boolean { value } => value.to_string(),
        ExprKind::Text { value } => format!("\"{}\"", value),
        ExprKind::BinaryOp { op, left, right } => {
            let (left_min, right_min) = op.operand_precedence();
            format!(
                "{} {} {}",
                operand(left, left_min),
                op.symbol(),
                operand(right, right_min)
            )
        }
        ExprKind::UnaryOp { op, operand: inner } => unary(*op, inner),
        ExprKind::Quantifier(q) => quantifier(q),
        ExprKind::SetComprehension(c) => comprehension(c),
        ExprKind::SetLiteral { elements } => format!("{{{}}}", list(elements)),
        ExprKind::SequenceLiteral { elements } => format!("⟨{}⟩", list(elements)),
        ExprKind::Tuple { elements } => format!("({})", list(elements)),
        ExprKind::FunctionApp {
            function,
            args,
            style: ApplicationStyle::Prefix,
        } => {
            let args: Vec<String> = args.iter().map(prefix_argument).collect();
            format!("{} {}", expr_to_source(function), args.join(" "))
        }
        ExprKind::FunctionApp {
            function,
            args,
            style: ApplicationStyle::Call,
        } => format!("{}({})", operand(function, precedence::ATOM), list(args)),
    }
}

fn operand(expr: &Expr, required: u8) -> String {
    let printed = expr_to_source(expr);
    if expr.precedence() < required {
        format!("({})", printed)
    } else {
        printed
    }
}

fn prefix_argument(arg: &Expr) -> String {
    match &arg.kind {
        ExprKind::UnaryOp {
            op: UnaryOperator::Negate,
            ..
        } => format!("({})", expr_to_source(arg)),
        _ => operand(arg, precedence::APPLICATION),
    }
}

fn unary(op: UnaryOperator, inner: &Expr) -> String {
    match op {
        UnaryOperator::Not => format!("not {}", operand(inner, precedence::NOT + 1)),
        UnaryOperator::Negate => {
            let printed = operand(inner, precedence::APPLICATION);
            if printed.starts_with('-') {
                format!("- {}", printed)
            } else {
                format!("-{}", printed)
            }
        }
        UnaryOperator::Cardinality => format!("#{}", operand(inner, precedence::APPLICATION)),
        UnaryOperator::Inverse => {
            let chained = matches!(
                inner.kind,
                ExprKind::UnaryOp {
                    op: UnaryOperator::Inverse,
                    ..
                }
            );
            if chained {
                format!("{}~", expr_to_source(inner))
            } else {
                format!("{}~", operand(inner, precedence::ATOM))
            }
        }
    }
}

fn quantifier(q: &Quantifier) -> String {
    let head = format!(
        "{} {} : {}",
        q.kind.keyword(),
        q.variables.join(", "),
        operand(&q.domain, precedence::IFF)
    );
    match (q.kind, &q.constraint) {
        (QuantifierKind::Mu, Some(constraint)) => format!(
            "{} | {} . {}",
            head,
            operand(constraint, precedence::IFF),
            expr_to_source(&q.body)
        ),
        (QuantifierKind::Mu, None) => format!("{} . {}", head, expr_to_source(&q.body)),
        _ => format!("{} | {}", head, expr_to_source(&q.body)),
    }
}

fn comprehension(c: &SetComprehension) -> String {
    let mut out = format!(
        "{{{} : {}",
        c.variables.join(", "),
        operand(&c.domain, precedence::IFF)
    );
    if let Some(p) = &c.predicate {
        out.push_str(&format!(" | {}", operand(p, precedence::IFF)));
    }
    if let Some(e) = &c.expression {
        out.push_str(&format!(" . {}", expr_to_source(e)));
    }
    out.push('}');
    out
}

fn list(elements: &[Expr]) -> String {
    elements
        .iter()
        .map(expr_to_source)
        .collect::<Vec<_>>()
        .join(", ")
}
