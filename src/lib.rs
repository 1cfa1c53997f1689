//! # zedtex
//!
//! Converts whiteboard-style Z notation into LaTeX for the `zed-csp` and `fuzz` packages.
//!
//! The conversion is a three-stage pipeline: [tokenize](zed::lexing::tokenize),
//! [parse](zed::parsing::parse) and [generate](zed::generation::generate). Most callers only
//! need [run_pipeline](zed::run_pipeline):
//!
//! ```rust-example
//! use zedtex::zed::{run_pipeline, Dialect};
//!
//! let latex = run_pipeline("given NAME, DATE\n", Dialect::Fuzz)?;
//! ```
//!
//! ## Testing
//!
//! AST factories and fluent document assertions live in the [testing module](zed::testing).

pub mod zed;
