//! Token stream transformations
//!
//!     Each transformation is a mapper from a flat token stream to a flat token stream. They are
//!     deliberately small and run in a fixed order from [tokenize](super::tokenize).

pub mod blank_lines;
pub mod continuation;
pub mod prose;

pub use blank_lines::BlankLineMapper;
pub use continuation::ContinuationMapper;
pub use prose::{is_part_label, ProseCaptureMapper};

use crate::zed::token::Token;

/// A transformation over a flat token stream.
pub trait TokenMapper {
    fn map(&mut self, tokens: Vec<Token>) -> Vec<Token>;
}
