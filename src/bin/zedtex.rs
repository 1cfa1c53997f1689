//! Command-line interface for zedtex
//!
//! Usage:
//!   zedtex convert `<path>` [--fuzz] [--format `<format>`] [--config `<file>`] [--body-only]
//!   zedtex expr `<text>` [--fuzz]
//!   zedtex formats
//!
//! Exit codes: 0 success, 1 lexical or syntax error, 2 generation error, 3 I/O or
//! configuration error. Set `RUST_LOG=debug` to see what each stage did.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::HashMap;
use std::process::ExitCode;
use thiserror::Error;
use zedtex::zed::config::Loader;
use zedtex::zed::pipeline::{
    available_formats, process_with_extras, run_expression, ProcessingError, ProcessingSpec,
    StageError,
};
use zedtex::zed::Dialect;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Stage(#[from] StageError),
    #[error("{0}")]
    Processing(#[from] ProcessingError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Stage(err) | CliError::Processing(ProcessingError::Stage(err)) => match err {
                StageError::Lexical { .. } | StageError::Syntax(_) => 1,
                StageError::Generation(_) => 2,
            },
            CliError::Processing(_) | CliError::Config(_) | CliError::Io { .. } => 3,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let fuzz = Arg::new("fuzz")
        .long("fuzz")
        .help("Render for the fuzz type checker instead of zed-csp")
        .action(ArgAction::SetTrue);

    let matches = Command::new("zedtex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts whiteboard Z notation into LaTeX")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert a whiteboard document")
                .arg(
                    Arg::new("path")
                        .help("Path to the whiteboard file")
                        .required(true)
                        .index(1),
                )
                .arg(fuzz.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'latex', 'token-simple', 'ast-treeviz')")
                        .default_value("latex"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML file layered over the built-in defaults"),
                )
                .arg(
                    Arg::new("body-only")
                        .long("body-only")
                        .help("Omit the preamble and \\begin{document}")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("expr")
                .about("Convert a single expression")
                .arg(
                    Arg::new("text")
                        .help("The expression, e.g. 'forall x : N | x >= 0'")
                        .required(true)
                        .index(1),
                )
                .arg(fuzz),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches),
        Some(("expr", expr_matches)) => handle_expr_command(expr_matches),
        Some(("formats", _)) => {
            handle_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn string_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) -> Result<(), CliError> {
    let path = string_arg(matches, "path");
    let spec = ProcessingSpec::from_string(string_arg(matches, "format"))?;

    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    if matches.get_flag("fuzz") {
        loader = loader.set_override("output.dialect", "fuzz")?;
    }
    if matches.get_flag("body-only") {
        loader = loader.set_override("output.standalone", false)?;
    }
    let config = loader.build()?;

    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut extras = HashMap::new();
    if config.inspect.show_line_numbers {
        extras.insert("show-linum".to_string(), "true".to_string());
    }
    let output = process_with_extras(&source, &spec, &config.generator_options(), &extras)?;
    print!("{}", output);
    Ok(())
}

/// Handle the expr command
fn handle_expr_command(matches: &ArgMatches) -> Result<(), CliError> {
    let dialect = if matches.get_flag("fuzz") {
        Dialect::Fuzz
    } else {
        Dialect::Standard
    };
    let latex = run_expression(string_arg(matches, "text"), dialect)?;
    println!("{}", latex);
    Ok(())
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available output formats:\n");
    for name in available_formats() {
        println!("  {}", name);
    }
}
