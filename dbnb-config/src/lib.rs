//! Shared configuration loader for the dbnb toolchain.
//!
//! `defaults/dbnb.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DbnbConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use dbnb_babel::{RegistryOptions, SourceDialect, SourceVersion};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/dbnb.default.toml");

/// Top-level configuration consumed by dbnb applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DbnbConfig {
    pub source: SourceConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

/// How paired-source files are read and written.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub version: SourceVersion,
    pub guest_language: String,
}

impl From<&SourceConfig> for SourceDialect {
    fn from(config: &SourceConfig) -> Self {
        SourceDialect::new(config.version, config.guest_language.as_str())
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_line_numbers: bool,
}

impl DbnbConfig {
    /// Dialect used for paired-source files.
    pub fn dialect(&self) -> SourceDialect {
        SourceDialect::from(&self.source)
    }

    /// Options for building the format registry.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            version: self.source.version,
            guest_language: self.source.guest_language.clone(),
            json_pretty: self.convert.json.pretty,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DbnbConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DbnbConfig, ConfigError> {
    Loader::new().build()
}
