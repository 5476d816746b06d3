//! Toolkit configuration.
//!
//! `defaults/toolkit.default.toml` is embedded so the documented defaults and
//! runtime behaviour cannot drift. Callers layer their own files or single-key
//! overrides on top through [`Loader`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/toolkit.default.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolkitConfig {
    pub expansion: ExpansionConfig,
    pub output: OutputConfig,
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpansionConfig {
    pub max_depth: usize,
    pub retain_intermediate: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    pub extension: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    pub marker: String,
    pub search_depth: usize,
}

/// Layers user files and overrides over the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file, skipping it when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ToolkitConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ToolkitConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.expansion.max_depth, 32);
        assert!(config.expansion.retain_intermediate);
        assert_eq!(config.output.extension, "php");
        assert_eq!(config.project.marker, "vendor");
        assert_eq!(config.project.search_depth, 10);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("expansion.max_depth", 4_i64)
            .expect("override to apply")
            .set_override("output.extension", "out")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.expansion.max_depth, 4);
        assert_eq!(config.output.extension, "out");
    }
}
