//! Token stream formatting
//!
//!     Two views of a token stream are useful when debugging the notation: the "simple" view
//!     (one `<kind:text>` tag per token, one output line per logical line) and the detokenized
//!     view, which rebuilds source text from the tokens' positions.

use super::core::{Token, TokenKind};

/// Trait for converting a token into its tag representation
pub trait ToSimpleString {
    fn to_simple_string(&self) -> String;
}

/// kebab-case name of a kind, e.g. `TotalFunction` -> `total-function`
pub fn kind_name(kind: TokenKind) -> String {
    let debug = format!("{:?}", kind);
    let mut name = String::with_capacity(debug.len() + 4);
    for (i, c) in debug.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

impl ToSimpleString for Token {
    fn to_simple_string(&self) -> String {
        match self.kind {
            TokenKind::Newline | TokenKind::BlankLine | TokenKind::Eof => {
                format!("<{}>", kind_name(self.kind))
            }
            kind => format!("<{}:{}>", kind_name(kind), self.text),
        }
    }
}

/// Rebuild source text from a token stream.
///
/// Tokens are placed at their recorded columns, so spacing inside a line is restored as long as
/// the stream came from [tokenize](crate::zed::lexing::tokenize). Continuations are not restored:
/// a continued line comes back as one physical line.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut column = 1;
    let mut line = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Newline | TokenKind::BlankLine => {
                out.push('\n');
                column = 1;
            }
            TokenKind::Eof => {}
            _ => {
                if token.line != line && column > 1 {
                    // continued onto the next physical line
                    out.push(' ');
                    column += 1;
                } else {
                    while column < token.column {
                        out.push(' ');
                        column += 1;
                    }
                }
                line = token.line;
                out.push_str(&token.text);
                column += token.text.chars().count();
            }
        }
    }

    out
}
