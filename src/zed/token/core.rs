//! Core token kinds
//!
//!     The logos derive below is the whole character-level grammar of the whiteboard notation.
//!     Every operator, reserved word and punctuation symbol gets its own kind so the parser can
//!     match on kinds instead of comparing strings. Logos always takes the longest match, which
//!     is what keeps `-->>` from being read as `-->` followed by `>`, and what keeps `N1` or
//!     `exists_x` a single identifier instead of a keyword plus a leftover.
//!
//!     Horizontal whitespace is skipped here. Line and indentation information is recovered
//!     from byte spans when tokens are materialized (see
//!     [tokenize](crate::zed::lexing::tokenize)).
//!
//!     A handful of kinds are never produced by logos: `BlankLine`, `Prose`, `Unknown` and `Eof`
//!     are synthesized by the lexing transformations.

use logos::Logos;
use serde::Serialize;
use std::ops::Range;

/// All token kinds of the whiteboard notation.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    // Logical connectives
    #[token("<=>")]
    #[token("⇔")]
    Iff,
    #[token("=>")]
    #[token("⇒")]
    Implies,
    #[token("and")]
    #[token("∧")]
    And,
    #[token("or")]
    #[token("∨")]
    Or,
    #[token("not")]
    #[token("¬")]
    Not,

    // Relations
    #[token("=")]
    Equals,
    #[token("!=")]
    #[token("≠")]
    NotEquals,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    #[token("≤")]
    LessEq,
    #[token(">=")]
    #[token("≥")]
    GreaterEq,
    #[token("in")]
    #[token("∈")]
    In,
    #[token("notin")]
    #[token("∉")]
    NotIn,
    #[token("subset")]
    #[token("⊂")]
    Subset,
    #[token("subseteq")]
    #[token("⊆")]
    SubsetEq,

    // Relation and function types
    #[token("<->")]
    Relation,
    #[token("-->")]
    TotalFunction,
    #[token("-+>")]
    PartialFunction,
    #[token(">->")]
    Injection,
    #[token(">+>")]
    PartialInjection,
    #[token("-->>")]
    Surjection,
    #[token("-+>>")]
    PartialSurjection,
    #[token(">->>")]
    Bijection,

    // Set operators
    #[token("union")]
    #[token("∪")]
    Union,
    #[token("inter")]
    #[token("∩")]
    Intersection,
    #[token("\\")]
    SetMinus,
    #[token("++")]
    Override,
    #[token("<|")]
    DomainRestriction,
    #[token("|>")]
    RangeRestriction,
    #[token("<<|")]
    DomainSubtraction,
    #[token("|>>")]
    RangeSubtraction,
    #[token("o9")]
    Compose,
    #[token("..")]
    UpTo,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("div")]
    Div,
    #[token("mod")]
    Mod,
    #[token("^")]
    Concat,
    #[token("cross")]
    #[token("×")]
    Cross,
    #[token("#")]
    Hash,
    #[token("~")]
    Tilde,

    // Binders and literals
    #[token("forall")]
    #[token("∀")]
    Forall,
    #[token("exists")]
    #[token("∃")]
    Exists,
    #[token("exists1")]
    ExistsOne,
    #[token("mu")]
    Mu,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Block keywords
    #[token("schema")]
    Schema,
    #[token("axdef")]
    AxDef,
    #[token("gendef")]
    GenDef,
    #[token("where")]
    Where,
    #[token("end")]
    End,
    #[token("given")]
    Given,
    #[token("PROOF")]
    Proof,
    #[token("TEXT")]
    Text,
    #[token("case")]
    Case,

    // Document directives
    #[token("TITLE")]
    Title,
    #[token("AUTHOR")]
    Author,
    #[token("DATE")]
    Date,
    #[token("BIBLIOGRAPHY")]
    Bibliography,
    #[token("BIBSTYLE")]
    BibStyle,
    #[token("PARTS")]
    Parts,
    #[token("LATEX")]
    Latex,
    #[token("===")]
    HeadingMarker,
    #[token("**")]
    SolutionMarker,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("⟨")]
    LAngle,
    #[token("⟩")]
    RAngle,
    #[token("<<")]
    LData,
    #[token(">>")]
    RData,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("|")]
    Pipe,
    #[token(".")]
    Dot,
    #[token("::")]
    DoubleColon,
    #[token("::=")]
    Defines,
    #[token("==")]
    DefinedAs,

    // Atoms
    #[regex(r"[A-Za-z][A-Za-z0-9_]*'*\??")]
    Identifier,
    #[regex(r"[0-9]+")]
    Number,
    #[regex(r#""[^"\n]*""#)]
    StringLiteral,

    // Layout
    #[token("\n")]
    Newline,

    // Synthesized by the lexing transformations
    BlankLine,
    Prose,
    Unknown,
    Eof,
}

/// Coarse token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenCategory {
    Operator,
    Keyword,
    Identifier,
    Number,
    Punctuation,
    String,
    Prose,
    Newline,
    BlankLine,
    EndOfInput,
    Unknown,
}

impl TokenKind {
    pub fn category(self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Iff | Implies | And | Or | Not | Equals | NotEquals | Less | Greater | LessEq
            | GreaterEq | In | NotIn | Subset | SubsetEq | Relation | TotalFunction
            | PartialFunction | Injection | PartialInjection | Surjection | PartialSurjection
            | Bijection | Union | Intersection | SetMinus | Override | DomainRestriction
            | RangeRestriction | DomainSubtraction | RangeSubtraction | Compose | UpTo | Plus
            | Minus | Star | Div | Mod | Concat | Cross | Hash | Tilde => TokenCategory::Operator,
            Forall | Exists | ExistsOne | Mu | True | False | Schema | AxDef | GenDef | Where
            | End | Given | Proof | Text | Case | Title | Author | Date | Bibliography
            | BibStyle | Parts | Latex | HeadingMarker | SolutionMarker => TokenCategory::Keyword,
            LParen | RParen | LBracket | RBracket | LBrace | RBrace | LAngle | RAngle | LData
            | RData | Comma | Colon | Semicolon | Pipe | Dot | DoubleColon | Defines
            | DefinedAs => TokenCategory::Punctuation,
            Identifier => TokenCategory::Identifier,
            Number => TokenCategory::Number,
            StringLiteral => TokenCategory::String,
            Prose => TokenCategory::Prose,
            Newline => TokenCategory::Newline,
            BlankLine => TokenCategory::BlankLine,
            Eof => TokenCategory::EndOfInput,
            Unknown => TokenCategory::Unknown,
        }
    }

    /// Kinds that end a logical line.
    pub fn is_line_end(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::BlankLine | TokenKind::Eof)
    }

    /// Keywords that take the rest of their line as verbatim text.
    pub fn is_directive(self) -> bool {
        matches!(
            self,
            TokenKind::Title
                | TokenKind::Author
                | TokenKind::Date
                | TokenKind::Bibliography
                | TokenKind::BibStyle
                | TokenKind::Parts
                | TokenKind::Latex
        )
    }

    /// Kinds that open a top-level item when they start a line.
    pub fn starts_block(self) -> bool {
        matches!(
            self,
            TokenKind::Schema
                | TokenKind::AxDef
                | TokenKind::GenDef
                | TokenKind::Given
                | TokenKind::Proof
                | TokenKind::Text
                | TokenKind::HeadingMarker
                | TokenKind::SolutionMarker
        ) || self.is_directive()
    }
}

/// Returns true when `word` lexes as a single reserved word rather than an identifier.
pub fn is_reserved_word(word: &str) -> bool {
    if word.is_empty() || !word.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    let mut lexer = TokenKind::lexer(word);
    let first = lexer.next();
    let whole = lexer.span() == (0..word.len());
    match first {
        Some(Ok(kind)) => whole && kind != TokenKind::Identifier && lexer.next().is_none(),
        _ => false,
    }
}

/// A materialized token: kind, literal text and where it came from.
///
/// `line` and `column` are 1-based. `indent` is the leading whitespace width of the physical
/// line the token starts on (a tab counts as four columns), which is what the proof parser
/// compares to build its nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub indent: usize,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
            indent: 0,
            span: 0..0,
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Column just past the last character of this token, on the same line.
    pub fn end_column(&self) -> usize {
        self.column + self.text.chars().count()
    }
}
