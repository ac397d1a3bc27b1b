use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::rl::config::{BrokerConfig, EnvConfig};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub environment: EnvConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DataConfig {
    /// Default price CSV when none is given on the command line
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub fn filter_directive(&self) -> String {
        self.level.clone()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load profile-specific config (e.g., config/backtest.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("FXGYM_PROFILE").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (FXGYM_BROKER__TRANSACTION_FEE, etc.)
            .add_source(
                Environment::with_prefix("FXGYM")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("environment.windows")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Create a default configuration for CLI usage
    pub fn default_config() -> Self {
        Self {
            broker: BrokerConfig::default(),
            environment: EnvConfig::default(),
            data: DataConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(mut broker_errors) = self.broker.validate() {
            errors.append(&mut broker_errors);
        }

        if let Err(mut env_errors) = self.environment.validate() {
            errors.append(&mut env_errors);
        }

        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            errors.push(format!("unknown log level: {}", self.logging.level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceField;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment.windows, vec![64]);
        assert_eq!(config.environment.price_field, PriceField::Close);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[broker]
starting_balance = 5000.0
transaction_fee = 0.002

[environment]
windows = [32, 16]
price_field = "open"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.broker.starting_balance, 5000.0);
        assert_eq!(config.broker.transaction_fee, 0.002);
        assert_eq!(config.environment.windows, vec![32, 16]);
        assert_eq!(config.environment.price_field, PriceField::Open);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.broker.starting_balance, 2000.0);
        assert_eq!(config.broker.transaction_fee, 0.01);
        assert!(config.data.path.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[broker]\ntransaction_fee = \"abc\"\n",
        )
        .unwrap();

        assert!(AppConfig::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_filter_directive_follows_level() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.filter_directive(), "info");

        logging.level = "debug".to_string();
        assert_eq!(logging.filter_directive(), "debug");
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = AppConfig::default_config();
        config.broker.transaction_fee = 2.0;
        config.environment.windows.clear();
        config.logging.level = "loud".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
