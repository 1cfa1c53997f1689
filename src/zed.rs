//! Main module for zedtex library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod generation;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod token;

pub use generation::{Dialect, GenerationError, GeneratorOptions};
pub use parsing::{ParserError, ParserErrorKind};
pub use pipeline::{run_expression, run_pipeline, run_pipeline_with, StageError};
