//! Configuration loading and validation for the `aes256` tool.
//!
//! Values are read from `AES256_*` environment variables. Every field has a
//! default, so an empty environment is a valid configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"warn"`, `"debug"`). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,

    /// Largest input file, in bytes, that `ctr`, `seal`, `open`, and `split`
    /// will read into memory.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_max_input_bytes() -> u64 {
    64 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("AES256").try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("AES256_LOG_LEVEL must not be empty");
        }
        if self.max_input_bytes == 0 {
            anyhow::bail!("AES256_MAX_INPUT_BYTES must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "warn");
        assert_eq!(default_max_input_bytes(), 67_108_864);
        let cfg = Config::default();
        assert!(!cfg.log_json);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_log_level() {
        let cfg = Config {
            log_level: "  ".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_input_limit() {
        let cfg = Config {
            max_input_bytes: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
