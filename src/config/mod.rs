//! Configuration module for Mauka Phrase.
//!
//! Settings are loaded from defaults, then an optional file (TOML, YAML, JSON),
//! then environment variables prefixed with `MAUKA_PHRASE__`. All values are
//! validated before use.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod matcher;
pub mod tokenizer;

pub use self::matcher::{CompilePolicy, MatcherConfig};
pub use self::tokenizer::{TokenizerConfig, TokenizerKind};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration location, used when no path is given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "config/mauka_phrase.toml";

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MAUKA_PHRASE";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for Mauka Phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaukaPhraseConfig {
    /// Tokenizer configuration
    pub tokenizer: TokenizerConfig,

    /// Matcher configuration
    pub matcher: MatcherConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for MaukaPhraseConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.tokenizer.validate()?;
        self.matcher.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: false,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for Mauka Phrase.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Creates a loader for `config_path`, falling back to
    /// [`DEFAULT_CONFIG_PATH`] when it exists.
    pub fn with_default_path(config_path: Option<&Path>) -> Self {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.exists().then_some(default)
        });
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Path of the configuration file this loader reads, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Loads the configuration from a file and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(MaukaPhraseConfig)` if the configuration was loaded successfully
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<MaukaPhraseConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&MaukaPhraseConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let phrase_config: MaukaPhraseConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        phrase_config.validate()?;
        tracing::debug!(
            path = ?self.config_path,
            tokenizer = ?phrase_config.tokenizer.kind,
            policy = ?phrase_config.matcher.compile_policy,
            "Configuration loaded"
        );

        Ok(phrase_config)
    }
}

impl MaukaPhraseConfig {
    /// Renders this configuration as pretty TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}
