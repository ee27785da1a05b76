//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Payment instruction configuration.
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum attempts for a balance posting before surfacing a
    /// concurrency conflict to the caller.
    #[serde(default = "default_max_post_attempts")]
    pub max_post_attempts: u32,
}

fn default_max_post_attempts() -> u32 {
    3
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_post_attempts: default_max_post_attempts(),
        }
    }
}

/// Payment instruction configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Prefix for generated instruction numbers (e.g. "PI-2026-00042").
    #[serde(default = "default_instruction_prefix")]
    pub instruction_prefix: String,
}

fn default_instruction_prefix() -> String {
    "PI".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            instruction_prefix: default_instruction_prefix(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TAHSIS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig {
            server: ServerConfig::default(),
            ledger: LedgerConfig::default(),
            payment: PaymentConfig::default(),
        };
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ledger.max_post_attempts, 3);
        assert_eq!(config.payment.instruction_prefix, "PI");
    }

    #[test]
    fn test_deserialize_partial() {
        let json = serde_json::json!({
            "server": { "port": 9000 },
            "ledger": {},
            "payment": {}
        });
        let config: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ledger.max_post_attempts, 3);
    }
}
