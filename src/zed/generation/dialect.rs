//! Output dialects
//!
//!     Both dialects share one grammar and almost all of their markup. They differ in the
//!     spelling of the built-in types and truth values, in the package the preamble loads, and
//!     in how tightly a prefix function holds its argument: `fuzz` insists that the argument of
//!     `\power`, `\seq` and friends is atomic, so anything larger is parenthesized.
//!
//!     The symbol tables are built once and only read afterwards.

use crate::zed::ast::{precedence, BinaryOperator, QuantifierKind, UnaryOperator};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `zed-csp`
    #[default]
    Standard,
    /// `fuzz`
    Fuzz,
}

static PREFIX_SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("P", "\\power"),
        ("P1", "\\power_1"),
        ("F", "\\finset"),
        ("F1", "\\finset_1"),
        ("seq", "\\seq"),
        ("seq1", "\\seq_1"),
        ("iseq", "\\iseq"),
        ("dom", "\\dom"),
        ("ran", "\\ran"),
        ("id", "\\id"),
        ("bigcup", "\\bigcup"),
        ("bigcap", "\\bigcap"),
    ])
});

static STANDARD_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("N", "\\mathbb{N}"),
        ("N1", "\\mathbb{N}_1"),
        ("Z", "\\mathbb{Z}"),
    ])
});

static FUZZ_TYPES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("N", "\\nat"), ("N1", "\\nat_1"), ("Z", "\\num")]));

impl Dialect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "zed-csp" => Some(Dialect::Standard),
            "fuzz" => Some(Dialect::Fuzz),
            _ => None,
        }
    }

    /// Packages the preamble loads for this dialect.
    pub fn packages(self) -> &'static [&'static str] {
        match self {
            Dialect::Standard => &["amssymb", "zed-csp"],
            Dialect::Fuzz => &["fuzz"],
        }
    }

    pub fn binary_symbol(self, op: BinaryOperator) -> &'static str {
        use BinaryOperator::*;
        match op {
            Iff => "\\iff",
            Implies => "\\implies",
            Or => "\\lor",
            And => "\\land",
            Equals => "=",
            NotEquals => "\\neq",
            Less => "<",
            Greater => ">",
            LessEq => "\\leq",
            GreaterEq => "\\geq",
            In => "\\in",
            NotIn => "\\notin",
            Subset => "\\subset",
            SubsetEq => "\\subseteq",
            Relation => "\\rel",
            TotalFunction => "\\fun",
            PartialFunction => "\\pfun",
            Injection => "\\inj",
            PartialInjection => "\\pinj",
            Surjection => "\\surj",
            PartialSurjection => "\\psurj",
            Bijection => "\\bij",
            Union => "\\cup",
            SetMinus => "\\setminus",
            Override => "\\oplus",
            Intersection => "\\cap",
            DomainRestriction => "\\dres",
            RangeRestriction => "\\rres",
            DomainSubtraction => "\\ndres",
            RangeSubtraction => "\\nrres",
            Compose => "\\comp",
            UpTo => "\\upto",
            Plus => "+",
            Minus => "-",
            Concat => "\\cat",
            Times => "*",
            Div => "\\div",
            Mod => "\\mod",
            Cross => "\\cross",
        }
    }

    pub fn unary_symbol(self, op: UnaryOperator) -> &'static str {
        match op {
            UnaryOperator::Not => "\\lnot",
            UnaryOperator::Negate => "-",
            UnaryOperator::Cardinality => "\\#",
            UnaryOperator::Inverse => "\\inv",
        }
    }

    pub fn quantifier_symbol(self, kind: QuantifierKind) -> &'static str {
        match kind {
            QuantifierKind::Forall => "\\forall",
            QuantifierKind::Exists => "\\exists",
            QuantifierKind::ExistsOne => "\\exists_1",
            QuantifierKind::Mu => "\\mu",
        }
    }

    pub fn prefix_symbol(self, name: &str) -> Option<&'static str> {
        PREFIX_SYMBOLS.get(name).copied()
    }

    /// Markup for a built-in type name, `None` for ordinary identifiers.
    pub fn type_name(self, name: &str) -> Option<&'static str> {
        let table = match self {
            Dialect::Standard => &STANDARD_TYPES,
            Dialect::Fuzz => &FUZZ_TYPES,
        };
        table.get(name).copied()
    }

    pub fn boolean(self, value: bool) -> &'static str {
        match (self, value) {
            (Dialect::Standard, true) => "\\mathrm{true}",
            (Dialect::Standard, false) => "\\mathrm{false}",
            (Dialect::Fuzz, true) => "true",
            (Dialect::Fuzz, false) => "false",
        }
    }

    /// Least precedence the argument of a prefix function may have without parentheses.
    pub fn prefix_argument_precedence(self) -> u8 {
        match self {
            Dialect::Standard => precedence::APPLICATION,
            Dialect::Fuzz => precedence::ATOM,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Standard => f.write_str("standard"),
            Dialect::Fuzz => f.write_str("fuzz"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_binary_token_is_an_operator() {
        use crate::zed::lexing::base_tokenization::tokenize;
        let source = "<=> => or and = != < > <= >= in notin subset subseteq <-> --> -+> >-> >+> \
                      -->> -+>> >->> union \\ ++ inter <| |> <<| |>> o9 .. + - ^ * div mod cross";
        let ops: Vec<BinaryOperator> = tokenize(source)
            .into_iter()
            .map(|(kind, _)| BinaryOperator::from_token(kind).unwrap())
            .collect();
        assert_eq!(ops.len(), 39);
        assert_eq!(Dialect::Standard.binary_symbol(BinaryOperator::SetMinus), "\\setminus");
        assert_eq!(Dialect::Fuzz.binary_symbol(BinaryOperator::Compose), "\\comp");
    }

    #[test]
    fn test_type_names_differ() {
        assert_eq!(Dialect::Standard.type_name("N"), Some("\\mathbb{N}"));
        assert_eq!(Dialect::Fuzz.type_name("N1"), Some("\\nat_1"));
        assert_eq!(Dialect::Fuzz.type_name("Z"), Some("\\num"));
        assert_eq!(Dialect::Standard.type_name("NAME"), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Dialect::from_name("Fuzz"), Some(Dialect::Fuzz));
        assert_eq!(Dialect::from_name("zed-csp"), Some(Dialect::Standard));
        assert_eq!(Dialect::from_name("latex"), None);
    }
}
