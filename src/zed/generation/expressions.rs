//! Expression rendering
//!
//!     Parentheses are decided locally. Each operand slot has a required precedence: for a
//!     left-associative operator at level L the left slot requires L and the right slot L + 1,
//!     mirrored for right-associative operators. An operand is wrapped exactly when its own
//!     precedence is lower than its slot requires. Parentheses written in the source are gone
//!     by now, so the output only has the ones the structure needs.

use super::dialect::Dialect;
use super::error::GenerationError;
use super::identifiers::render_identifier;
use crate::zed::ast::{
    precedence, ApplicationStyle, Expr, ExprKind, Quantifier, QuantifierKind, SetComprehension,
    UnaryOperator,
};

/// Render one expression in the given dialect.
pub fn generate_expression(expr: &Expr, dialect: Dialect) -> Result<String, GenerationError> {
    ExprRenderer::new(dialect).render(expr)
}

pub struct ExprRenderer {
    dialect: Dialect,
}

impl ExprRenderer {
    pub fn new(dialect: Dialect) -> Self {
        ExprRenderer { dialect }
    }

    pub fn render(&self, expr: &Expr) -> Result<String, GenerationError> {
        let d = self.dialect;
        let out = match &expr.kind {
            ExprKind::Identifier { name } => render_identifier(name, d),
            ExprKind::Number { value } => value.clone(),
            ExprKind::Boolean { value } => d.boolean(*value).to_string(),
            ExprKind::Text { value } => format!("\\mbox{{``{}''}}", value),
            ExprKind::BinaryOp { op, left, right } => {
                let (left_min, right_min) = op.operand_precedence();
                format!(
                    "{} {} {}",
                    self.operand(left, left_min)?,
                    d.binary_symbol(*op),
                    self.operand(right, right_min)?
                )
            }
            ExprKind::UnaryOp { op, operand } => self.render_unary(*op, operand)?,
            ExprKind::Quantifier(q) => self.render_quantifier(q, expr)?,
            ExprKind::SetComprehension(c) => self.render_comprehension(c, expr)?,
            ExprKind::SetLiteral { elements } if elements.is_empty() => "\\emptyset".to_string(),
            ExprKind::SetLiteral { elements } => format!("\\{{{}\\}}", self.list(elements)?),
            ExprKind::SequenceLiteral { elements } if elements.is_empty() => {
                "\\langle \\rangle".to_string()
            }
            ExprKind::SequenceLiteral { elements } => {
                format!("\\langle {} \\rangle", self.list(elements)?)
            }
            ExprKind::Tuple { elements } => format!("({})", self.list(elements)?),
            ExprKind::FunctionApp {
                function,
                args,
                style,
            } => self.render_application(function, args, *style)?,
        };
        Ok(out)
    }

    /// Render `expr` into a slot that requires `required`, parenthesizing if it binds looser.
    pub fn operand(&self, expr: &Expr, required: u8) -> Result<String, GenerationError> {
        let rendered = self.render(expr)?;
        if expr.precedence() < required {
            Ok(format!("({})", rendered))
        } else {
            Ok(rendered)
        }
    }

    fn list(&self, elements: &[Expr]) -> Result<String, GenerationError> {
        let rendered = elements
            .iter()
            .map(|e| self.render(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(", "))
    }

    fn render_unary(&self, op: UnaryOperator, operand: &Expr) -> Result<String, GenerationError> {
        let symbol = self.dialect.unary_symbol(op);
        let out = match op {
            UnaryOperator::Not => {
                format!("{} {}", symbol, self.operand(operand, precedence::NOT + 1)?)
            }
            UnaryOperator::Negate => {
                format!("{}{}", symbol, self.operand(operand, precedence::APPLICATION)?)
            }
            UnaryOperator::Cardinality => {
                format!("{} {}", symbol, self.operand(operand, precedence::APPLICATION)?)
            }
            UnaryOperator::Inverse => {
                let chained = matches!(
                    operand.kind,
                    ExprKind::UnaryOp {
                        op: UnaryOperator::Inverse,
                        ..
                    }
                );
                let inner = if chained {
                    self.render(operand)?
                } else {
                    self.operand(operand, precedence::ATOM)?
                };
                format!("{}{}", inner, symbol)
            }
        };
        Ok(out)
    }

    fn render_application(
        &self,
        function: &Expr,
        args: &[Expr],
        style: ApplicationStyle,
    ) -> Result<String, GenerationError> {
        match style {
            ApplicationStyle::Prefix => {
                let head = match function.as_identifier().and_then(|n| self.dialect.prefix_symbol(n)) {
                    Some(symbol) => symbol.to_string(),
                    None => self.render(function)?,
                };
                let required = self.dialect.prefix_argument_precedence();
                let args = args
                    .iter()
                    .map(|a| self.operand(a, required))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{} {}", head, args.join(" ")))
            }
            ApplicationStyle::Call => Ok(format!(
                "{}({})",
                self.operand(function, precedence::ATOM)?,
                self.list(args)?
            )),
        }
    }

    fn render_quantifier(&self, q: &Quantifier, at: &Expr) -> Result<String, GenerationError> {
        if q.variables.is_empty() {
            return Err(GenerationError::NoBoundVariables {
                construct: "quantifier",
                line: at.line,
                column: at.column,
            });
        }
        let mut out = format!(
            "{} {} : {}",
            self.dialect.quantifier_symbol(q.kind),
            self.variables(&q.variables),
            self.render(&q.domain)?
        );
        if let (QuantifierKind::Mu, Some(constraint)) = (q.kind, &q.constraint) {
            out.push_str(&format!(" | {}", self.render(constraint)?));
        }
        out.push_str(&format!(" @ {}", self.render(&q.body)?));
        Ok(out)
    }

    fn render_comprehension(
        &self,
        c: &SetComprehension,
        at: &Expr,
    ) -> Result<String, GenerationError> {
        if c.variables.is_empty() {
            return Err(GenerationError::NoBoundVariables {
                construct: "set comprehension",
                line: at.line,
                column: at.column,
            });
        }
        let mut out = format!(
            "\\{{ {} : {}",
            self.variables(&c.variables),
            self.render(&c.domain)?
        );
        match (&c.predicate, &c.expression) {
            (None, None) => {
                return Err(GenerationError::EmptyComprehension {
                    line: at.line,
                    column: at.column,
                })
            }
            (Some(p), None) => out.push_str(&format!(" | {}", self.render(p)?)),
            (None, Some(e)) => out.push_str(&format!(" @ {}", self.render(e)?)),
            (Some(p), Some(e)) => {
                out.push_str(&format!(" | {} @ {}", self.render(p)?, self.render(e)?))
            }
        }
        out.push_str(" \\}");
        Ok(out)
    }

    fn variables(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| render_identifier(n, self.dialect))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
