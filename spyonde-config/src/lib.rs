//! Shared configuration loader for spyonde.
//!
//! `defaults/spyonde.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and command-line
//! overrides on top via [`Loader`] before deserializing into [`SpyondeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/spyonde.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpyondeConfig {
    pub convert: ConvertConfig,
}

/// How scripts are turned into notebook files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConvertConfig {
    pub nbversion: String,
    pub output_suffix: String,
    pub overwrite: bool,
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

    /// Apply a single key/value override, such as a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SpyondeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SpyondeConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.convert.nbversion, "3.7.4");
        assert_eq!(config.convert.output_suffix, ".gen.ipynb");
        assert!(!config.convert.overwrite);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.nbversion", "3.11")
            .expect("override to apply")
            .set_override("convert.overwrite", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.nbversion, "3.11");
        assert!(config.convert.overwrite);
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let dir = std::env::temp_dir().join(format!("spyonde-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("spyonde.toml");
        fs::write(&path, "[convert]\noutput_suffix = \".ipynb\"\n").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.convert.output_suffix, ".ipynb");
        assert_eq!(config.convert.nbversion, "3.7.4");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("no/such/spyonde.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, load_defaults().expect("defaults"));
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new().with_file("no/such/spyonde.toml").build().is_err());
    }
}
