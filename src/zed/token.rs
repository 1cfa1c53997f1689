//! Token types shared by the tokenizer, the parser and the debugging formats.
//!
//!     Tokens are produced in two layers. The [core] layer is the logos grammar: one kind per
//!     operator, keyword and punctuation symbol. The lexing transformations then materialize
//!     those into [Token] values carrying line, column and indentation, and synthesize the
//!     layout kinds (blank lines, verbatim prose, end of input) the parser relies on.

pub mod core;
pub mod formatting;

pub use core::{is_reserved_word, Token, TokenCategory, TokenKind};
pub use formatting::{detokenize, ToSimpleString};
