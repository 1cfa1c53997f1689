//! Pipeline entry points
//!
//!     Lex, parse and generate, in that order, with the first failure stopping the run. Every
//!     entry point here is a pure function of its input: the stages share no state, so two
//!     documents can be converted on different threads at the same time.
//!
//!     Besides LaTeX, the intermediate stages can be dumped for debugging. A processing spec is
//!     written `<stage>-<format>`, e.g. `token-simple` or `ast-treeviz`; plain `latex` runs
//!     the whole pipeline.

use crate::zed::ast::{Document, Expr};
use crate::zed::formats::to_treeviz_str_with_params;
use crate::zed::generation::{
    generate, generate_expression, Dialect, GenerationError, GeneratorOptions,
};
use crate::zed::lexing::tokenize;
use crate::zed::parsing::{parse, parse_expression, ParserError};
use crate::zed::token::{detokenize, Token, TokenKind, ToSimpleString};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Failure of one pipeline stage, with the position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("lexical error at line {line}, column {column}: {message}")]
    Lexical {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("syntax error: {0}")]
    Syntax(ParserError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl From<ParserError> for StageError {
    fn from(err: ParserError) -> Self {
        if err.is_lexical() {
            StageError::Lexical {
                line: err.line,
                column: err.column,
                message: err.message,
            }
        } else {
            StageError::Syntax(err)
        }
    }
}

impl StageError {
    /// Source position, when the error has one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            StageError::Lexical { line, column, .. } => Some((*line, *column)),
            StageError::Syntax(err) => Some((err.line, err.column)),
            StageError::Generation(_) => None,
        }
    }
}

/// Convert a whiteboard document into a complete LaTeX document.
pub fn run_pipeline(text: &str, dialect: Dialect) -> Result<String, StageError> {
    run_pipeline_with(text, &GeneratorOptions::new(dialect))
}

pub fn run_pipeline_with(text: &str, options: &GeneratorOptions) -> Result<String, StageError> {
    let document = parse_document(text)?;
    let latex = generate(&document, options)?;
    debug!("generation: {} bytes", latex.len());
    Ok(latex)
}

/// Convert a single expression. The result is the bare math-mode fragment.
pub fn run_expression(text: &str, dialect: Dialect) -> Result<String, StageError> {
    let tokens = tokenize(text);
    debug!("lexing: {} tokens", tokens.len());
    let expr: Expr = parse_expression(tokens)?;
    Ok(generate_expression(&expr, dialect)?)
}

/// Lex and parse, stopping before generation.
pub fn parse_document(text: &str) -> Result<Document, StageError> {
    let tokens = tokenize(text);
    debug!("lexing: {} tokens", tokens.len());
    let document = parse(tokens)?;
    debug!("parsing: {} items", document.items.len());
    Ok(document)
}

/// Represents the processing stage (how far the pipeline runs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Latex,
}

/// Represents the output format of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    /// Source text rebuilt from the token stream
    Detokenized,
    Treeviz,
    Latex,
}

/// A stage and a format that stage can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid stage: {0}")]
    InvalidStage(String),
    #[error("invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Stage(#[from] StageError),
}

impl ProcessingSpec {
    /// Parse a spec string like "token-simple", "ast-treeviz" or "latex"
    pub fn from_string(spec: &str) -> Result<Self, ProcessingError> {
        if spec == "latex" {
            return Ok(ProcessingSpec {
                stage: ProcessingStage::Latex,
                format: OutputFormat::Latex,
            });
        }

        let (stage, format) = spec
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(spec.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "detokenized" => OutputFormat::Detokenized,
            "treeviz" => OutputFormat::Treeviz,
            other => return Err(ProcessingError::InvalidFormatType(other.to_string())),
        };

        match (stage, format) {
            (ProcessingStage::Ast, OutputFormat::Treeviz) => {}
            (
                ProcessingStage::Token,
                OutputFormat::Simple | OutputFormat::Json | OutputFormat::Detokenized,
            ) => {}
            (ProcessingStage::Ast, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "format '{:?}' not supported for the ast stage (only 'treeviz' is)",
                    format
                )))
            }
            (_, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "format '{:?}' only works with the ast stage",
                    format
                )))
            }
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// The string `from_string` accepts for this spec
    pub fn name(&self) -> String {
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Detokenized => "detokenized",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Latex => return "latex".to_string(),
        };
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Latex => return "latex".to_string(),
        };
        format!("{}-{}", stage, format)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Latex,
                format: OutputFormat::Latex,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Detokenized,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz,
            },
        ]
    }
}

/// Names of every spec `process` accepts
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Run the pipeline as far as `spec` asks and format the result, with default options.
pub fn process(text: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    process_with(text, spec, &GeneratorOptions::default())
}

pub fn process_with(
    text: &str,
    spec: &ProcessingSpec,
    options: &GeneratorOptions,
) -> Result<String, ProcessingError> {
    process_with_extras(text, spec, options, &HashMap::new())
}

/// Like [process_with], passing format-specific extras (e.g. `show-linum` for treeviz).
pub fn process_with_extras(
    text: &str,
    spec: &ProcessingSpec,
    options: &GeneratorOptions,
    extras: &HashMap<String, String>,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => format_tokens(&tokenize(text), spec.format),
        ProcessingStage::Ast => Ok(to_treeviz_str_with_params(&parse_document(text)?, extras)),
        ProcessingStage::Latex => Ok(run_pipeline_with(text, options)?),
    }
}

pub fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_simple_string());
                if matches!(token.kind, TokenKind::Newline | TokenKind::BlankLine) {
                    result.push('\n');
                }
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Detokenized => Ok(detokenize(tokens)),
        OutputFormat::Treeviz | OutputFormat::Latex => Err(ProcessingError::InvalidFormatType(
            format!("{:?} is not a token format", format),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zed::parsing::ParserErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("latex", ProcessingStage::Latex, OutputFormat::Latex)]
    #[case("token-simple", ProcessingStage::Token, OutputFormat::Simple)]
    #[case("token-json", ProcessingStage::Token, OutputFormat::Json)]
    #[case("token-detokenized", ProcessingStage::Token, OutputFormat::Detokenized)]
    #[case("ast-treeviz", ProcessingStage::Ast, OutputFormat::Treeviz)]
    fn test_spec_parsing(
        #[case] name: &str,
        #[case] stage: ProcessingStage,
        #[case] format: OutputFormat,
    ) {
        let spec = ProcessingSpec::from_string(name).unwrap();
        assert_eq!(spec, ProcessingSpec { stage, format });
        assert_eq!(spec.name(), name);
    }

    #[rstest]
    #[case("tokens")]
    #[case("parse-simple")]
    #[case("ast-simple")]
    #[case("token-treeviz")]
    #[case("token-xml")]
    fn test_invalid_specs(#[case] name: &str) {
        assert!(ProcessingSpec::from_string(name).is_err());
    }

    #[test]
    fn test_available_formats_all_parse() {
        for name in available_formats() {
            assert!(ProcessingSpec::from_string(&name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_run_expression() {
        assert_eq!(
            run_expression("x in N", Dialect::Standard).unwrap(),
            "x \\in \\mathbb{N}"
        );
        assert_eq!(run_expression("x in N", Dialect::Fuzz).unwrap(), "x \\in \\nat");
    }

    #[test]
    fn test_unknown_character_is_lexical() {
        let err = run_expression("x @ y", Dialect::Standard).unwrap_err();
        match err {
            StageError::Lexical { line, column, .. } => assert_eq!((line, column), (1, 3)),
            other => panic!("expected a lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_keeps_parser_error() {
        let err = run_pipeline("schema S\n  x : N\n", Dialect::Standard).unwrap_err();
        match err {
            StageError::Syntax(e) => assert_eq!(e.kind, ParserErrorKind::Structure),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_token_simple_format() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let out = process("x = 1\n", &spec).unwrap();
        assert_eq!(out, "<identifier:x><equals:=><number:1><newline>\n<eof>");
    }

    #[test]
    fn test_token_json_format() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let out = process("x\n", &spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "Identifier");
        assert_eq!(value[0]["text"], "x");
        assert_eq!(value[0]["line"], 1);
    }

    #[test]
    fn test_body_only_pipeline() {
        let options = GeneratorOptions::new(Dialect::Standard).body_only();
        assert_eq!(
            run_pipeline_with("given A\n", &options).unwrap(),
            "\\begin{zed}\n[A]\n\\end{zed}\n"
        );
    }
}
