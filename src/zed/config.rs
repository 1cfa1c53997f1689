//! Configuration loading
//!
//! `defaults/zedtex.default.toml` is embedded into the binary so that the documented defaults
//! and runtime behavior stay in sync. A user file and individual key overrides are layered on
//! top via [`Loader`] before deserializing into [`ZedConfig`].

use crate::zed::generation::{Dialect, GeneratorOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/zedtex.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ZedConfig {
    pub output: OutputConfig,
    pub document: DocumentConfig,
    pub inspect: InspectConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dialect: Dialect,
    pub standalone: bool,
}

/// Preamble settings, used only for standalone output
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub class: String,
    pub class_options: Vec<String>,
    pub extra_packages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_line_numbers: bool,
}

impl ZedConfig {
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            dialect: self.output.dialect,
            standalone: self.output.standalone,
            document_class: self.document.class.clone(),
            class_options: self.document.class_options.clone(),
            extra_packages: self.document.extra_packages.clone(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `output.dialect` from `--fuzz`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ZedConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ZedConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.dialect, Dialect::Standard);
        assert!(config.output.standalone);
        assert_eq!(config.document.class, "article");
        assert!(!config.inspect.show_line_numbers);
        assert_eq!(config.generator_options(), GeneratorOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.dialect", "fuzz")
            .expect("override to apply")
            .set_override("output.standalone", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.generator_options();
        assert_eq!(options.dialect, Dialect::Fuzz);
        assert!(!options.standalone);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/zedtex.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/zedtex.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.dialect, Dialect::Standard);
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        let result = Loader::new()
            .set_override("output.dialect", "latex2e")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
