//! Operator tables
//!
//!     The operator sets are closed. Each binary operator has a fixed precedence level and
//!     associativity; the parser climbs these levels and the generator uses the same numbers to
//!     decide where parentheses are needed, so the two can never disagree.

use crate::zed::token::TokenKind;

/// Precedence levels, loosest first.
pub mod precedence {
    /// Quantifiers: the body extends as far right as possible
    pub const BINDER: u8 = 0;
    pub const IFF: u8 = 1;
    pub const IMPLIES: u8 = 2;
    pub const OR: u8 = 3;
    pub const AND: u8 = 4;
    pub const NOT: u8 = 5;
    pub const RELATION: u8 = 6;
    pub const FUNCTION_TYPE: u8 = 7;
    pub const UNION: u8 = 8;
    pub const INTERSECTION: u8 = 9;
    pub const UPTO: u8 = 10;
    pub const ADDITIVE: u8 = 11;
    pub const MULTIPLICATIVE: u8 = 12;
    pub const CROSS: u8 = 13;
    /// Prefix function application, `#`, unary minus, postfix inverse
    pub const APPLICATION: u8 = 14;
    /// Identifiers, literals and anything already delimited
    pub const ATOM: u8 = 15;
}

/// Names that apply to an operand by juxtaposition: `P X`, `dom R`.
pub const PREFIX_FUNCTIONS: &[&str] = &[
    "P", "P1", "F", "F1", "seq", "seq1", "iseq", "dom", "ran", "id", "bigcup", "bigcap",
];

pub fn is_prefix_function(name: &str) -> bool {
    PREFIX_FUNCTIONS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Iff,
    Implies,
    Or,
    And,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    In,
    NotIn,
    Subset,
    SubsetEq,
    Relation,
    TotalFunction,
    PartialFunction,
    Injection,
    PartialInjection,
    Surjection,
    PartialSurjection,
    Bijection,
    Union,
    SetMinus,
    Override,
    Intersection,
    DomainRestriction,
    RangeRestriction,
    DomainSubtraction,
    RangeSubtraction,
    Compose,
    UpTo,
    Plus,
    Minus,
    Concat,
    Times,
    Div,
    Mod,
    Cross,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use BinaryOperator as B;
        let op = match kind {
            TokenKind::Iff => B::Iff,
            TokenKind::Implies => B::Implies,
            TokenKind::Or => B::Or,
            TokenKind::And => B::And,
            TokenKind::Equals => B::Equals,
            TokenKind::NotEquals => B::NotEquals,
            TokenKind::Less => B::Less,
            TokenKind::Greater => B::Greater,
            TokenKind::LessEq => B::LessEq,
            TokenKind::GreaterEq => B::GreaterEq,
            TokenKind::In => B::In,
            TokenKind::NotIn => B::NotIn,
            TokenKind::Subset => B::Subset,
            TokenKind::SubsetEq => B::SubsetEq,
            TokenKind::Relation => B::Relation,
            TokenKind::TotalFunction => B::TotalFunction,
            TokenKind::PartialFunction => B::PartialFunction,
            TokenKind::Injection => B::Injection,
            TokenKind::PartialInjection => B::PartialInjection,
            TokenKind::Surjection => B::Surjection,
            TokenKind::PartialSurjection => B::PartialSurjection,
            TokenKind::Bijection => B::Bijection,
            TokenKind::Union => B::Union,
            TokenKind::SetMinus => B::SetMinus,
            TokenKind::Override => B::Override,
            TokenKind::Intersection => B::Intersection,
            TokenKind::DomainRestriction => B::DomainRestriction,
            TokenKind::RangeRestriction => B::RangeRestriction,
            TokenKind::DomainSubtraction => B::DomainSubtraction,
            TokenKind::RangeSubtraction => B::RangeSubtraction,
            TokenKind::Compose => B::Compose,
            TokenKind::UpTo => B::UpTo,
            TokenKind::Plus => B::Plus,
            TokenKind::Minus => B::Minus,
            TokenKind::Concat => B::Concat,
            TokenKind::Star => B::Times,
            TokenKind::Div => B::Div,
            TokenKind::Mod => B::Mod,
            TokenKind::Cross => B::Cross,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> u8 {
        use BinaryOperator::*;
        match self {
            Iff => precedence::IFF,
            Implies => precedence::IMPLIES,
            Or => precedence::OR,
            And => precedence::AND,
            Equals | NotEquals | Less | Greater | LessEq | GreaterEq | In | NotIn | Subset
            | SubsetEq => precedence::RELATION,
            Relation | TotalFunction | PartialFunction | Injection | PartialInjection
            | Surjection | PartialSurjection | Bijection => precedence::FUNCTION_TYPE,
            Union | SetMinus | Override => precedence::UNION,
            Intersection | DomainRestriction | RangeRestriction | DomainSubtraction
            | RangeSubtraction | Compose => precedence::INTERSECTION,
            UpTo => precedence::UPTO,
            Plus | Minus | Concat => precedence::ADDITIVE,
            Times | Div | Mod => precedence::MULTIPLICATIVE,
            Cross => precedence::CROSS,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOperator::Iff | BinaryOperator::Implies => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// Minimum precedence required of the (left, right) operands.
    pub fn operand_precedence(self) -> (u8, u8) {
        let level = self.precedence();
        match self.associativity() {
            Associativity::Left => (level, level + 1),
            Associativity::Right => (level + 1, level),
        }
    }

    /// Whiteboard spelling
    pub fn symbol(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Iff => "<=>",
            Implies => "=>",
            Or => "or",
            And => "and",
            Equals => "=",
            NotEquals => "!=",
            Less => "<",
            Greater => ">",
            LessEq => "<=",
            GreaterEq => ">=",
            In => "in",
            NotIn => "notin",
            Subset => "subset",
            SubsetEq => "subseteq",
            Relation => "<->",
            TotalFunction => "-->",
            PartialFunction => "-+>",
            Injection => ">->",
            PartialInjection => ">+>",
            Surjection => "-->>",
            PartialSurjection => "-+>>",
            Bijection => ">->>",
            Union => "union",
            SetMinus => "\\",
            Override => "++",
            Intersection => "inter",
            DomainRestriction => "<|",
            RangeRestriction => "|>",
            DomainSubtraction => "<<|",
            RangeSubtraction => "|>>",
            Compose => "o9",
            UpTo => "..",
            Plus => "+",
            Minus => "-",
            Concat => "^",
            Times => "*",
            Div => "div",
            Mod => "mod",
            Cross => "cross",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Negate,
    Cardinality,
    /// Postfix relational inverse, `R~`
    Inverse,
}

impl UnaryOperator {
    pub fn precedence(self) -> u8 {
        match self {
            UnaryOperator::Not => precedence::NOT,
            _ => precedence::APPLICATION,
        }
    }

    pub fn is_postfix(self) -> bool {
        self == UnaryOperator::Inverse
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Not => "not",
            UnaryOperator::Negate => "-",
            UnaryOperator::Cardinality => "#",
            UnaryOperator::Inverse => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantifierKind {
    Forall,
    Exists,
    ExistsOne,
    Mu,
}

impl QuantifierKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Forall => Some(QuantifierKind::Forall),
            TokenKind::Exists => Some(QuantifierKind::Exists),
            TokenKind::ExistsOne => Some(QuantifierKind::ExistsOne),
            TokenKind::Mu => Some(QuantifierKind::Mu),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            QuantifierKind::Forall => "forall",
            QuantifierKind::Exists => "exists",
            QuantifierKind::ExistsOne => "exists1",
            QuantifierKind::Mu => "mu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        use BinaryOperator::*;
        let chain = [Iff, Implies, Or, And, Equals, Relation, Union, Plus, Times, Cross];
        for pair in chain.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence(), "{:?}", pair);
        }
        assert!(And.precedence() < UnaryOperator::Not.precedence());
        assert!(UnaryOperator::Not.precedence() < Equals.precedence());
    }

    #[test]
    fn test_associativity() {
        assert_eq!(BinaryOperator::Implies.associativity(), Associativity::Right);
        assert_eq!(BinaryOperator::Iff.associativity(), Associativity::Right);
        assert_eq!(BinaryOperator::Cross.associativity(), Associativity::Left);
        assert_eq!(BinaryOperator::Cross.operand_precedence(), (13, 14));
        assert_eq!(BinaryOperator::Implies.operand_precedence(), (3, 2));
    }

    #[test]
    fn test_symbols_round_trip_through_tokens() {
        use crate::zed::lexing::base_tokenization::tokenize;
        for op in [
            BinaryOperator::Surjection,
            BinaryOperator::DomainSubtraction,
            BinaryOperator::Times,
            BinaryOperator::SetMinus,
            BinaryOperator::Cross,
        ] {
            let tokens = tokenize(op.symbol());
            assert_eq!(tokens.len(), 1);
            assert_eq!(BinaryOperator::from_token(tokens[0].0), Some(op));
        }
    }
}
