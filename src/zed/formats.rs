//! Output formats other than LaTeX
//!
//!     - `treeviz`: a one-line-per-node view of the AST, for debugging parses.
//!     - `source`: prints expressions back as whiteboard text.
//!
//!     Token output lives with the tokens, see [crate::zed::token::formatting].

pub mod source;
pub mod treeviz;

pub use source::expr_to_source;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, AstSnapshot};
