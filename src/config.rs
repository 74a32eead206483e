use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::sql_generator::SqlDialect;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Application configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the model manifest (YAML)
    #[validate(length(min = 1, message = "Model manifest path cannot be empty"))]
    pub model_path: String,

    /// Rows per generated statement (1-100000)
    #[validate(range(
        min = 1,
        max = 100_000,
        message = "Batch size must be between 1 and 100000"
    ))]
    pub batch_size: usize,

    /// Target SQL dialect
    pub dialect: SqlDialect,

    /// Render values as inline literals instead of placeholders
    pub inline_values: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: "model.yaml".to_string(),
            batch_size: 1000,
            dialect: SqlDialect::Postgres,
            inline_values: false,
        }
    }
}

/// CLI-provided overrides, merged over the environment by
/// [`AppConfig::from_cli`].
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub model_path: Option<String>,
    pub batch_size: Option<usize>,
    pub dialect: Option<String>,
    pub inline_values: bool,
}

impl AppConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            model_path: env::var("BULKBRIDGE_MODEL").unwrap_or(defaults.model_path),
            batch_size: parse_env_var("BULKBRIDGE_BATCH_SIZE", "1000")?,
            dialect: parse_dialect_env("BULKBRIDGE_DIALECT", "postgres")?,
            inline_values: parse_env_var("BULKBRIDGE_INLINE", "false")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments layered over the environment
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = Self::from_env()?;

        if let Some(model_path) = cli.model_path {
            config.model_path = model_path;
        }
        if let Some(batch_size) = cli.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(dialect) = cli.dialect {
            config.dialect = dialect.parse().map_err(|e: String| ConfigError::Parse {
                field: "dialect".to_string(),
                value: dialect.clone(),
                source: e.into(),
            })?;
        }
        if cli.inline_values {
            config.inline_values = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Parse {
        field: name.to_string(),
        value,
        source: Box::new(e),
    })
}

/// Parse a dialect environment variable (its FromStr error is a plain String)
fn parse_dialect_env(name: &str, default: &str) -> Result<SqlDialect, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: String| ConfigError::Parse {
        field: name.to_string(),
        value,
        source: e.into(),
    })
}
