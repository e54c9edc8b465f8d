//! Environment-based Configuration
//!
//! All settings are resolved once at startup from environment variables
//! (a `.env` file is honored via dotenv). Nothing is re-read per request.
//!
//! # Environment Variables
//!
//! ## Daemon connection (required)
//! - `ROSETTA_RPC_URL` - Verus daemon JSON-RPC endpoint
//! - `ROSETTA_RPC_USER` - RPC basic-auth user
//! - `ROSETTA_RPC_PASS` - RPC basic-auth password
//!
//! ## Optional settings
//! - `ROSETTA_API_PORT` - HTTP listen port (default: 3001)
//! - `ROSETTA_PRODUCTION` - "1"/"true" for production mode (default: false)
//! - `ROSETTA_BLOCK_CONFIRMATIONS` - confirmed threshold for blocks (default: 15)
//! - `ROSETTA_TX_CONFIRMATIONS` - confirmed threshold for transactions (default: 100)
//! - `ROSETTA_RPC_TIMEOUT_SECS` - upstream call timeout, 1-300 (default: 15)
//! - `ROSETTA_LOG_LEVEL` - logging level (default: "info")

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// Daemon JSON-RPC endpoint
    pub rpc_url: String,

    /// RPC basic-auth user
    pub rpc_user: String,

    /// RPC basic-auth password
    pub rpc_pass: String,

    /// HTTP listen port
    pub api_port: u16,

    /// Production mode: JSON logs, rate limiting enabled
    pub production: bool,

    /// Confirmations required before a block is reported "confirmed"
    pub block_confirmations: u64,

    /// Confirmations required before a transaction is reported "confirmed"
    pub tx_confirmations: u64,

    /// Upstream call timeout in seconds
    pub rpc_timeout_secs: u64,

    /// Log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let rpc_url = get_required("ROSETTA_RPC_URL")?;
        let rpc_user = get_required("ROSETTA_RPC_USER")?;
        let rpc_pass = get_required("ROSETTA_RPC_PASS")?;

        let api_port = get_parsed("ROSETTA_API_PORT", 3001)?;

        // A single typed flag; "1", "true" and "True" are all accepted,
        // everything else is false.
        let production = env::var("ROSETTA_PRODUCTION")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        // Block and transaction thresholds are intentionally independent;
        // existing deployments treat them differently.
        let block_confirmations = get_parsed("ROSETTA_BLOCK_CONFIRMATIONS", 15)?;
        let tx_confirmations = get_parsed("ROSETTA_TX_CONFIRMATIONS", 100)?;

        let rpc_timeout_secs: u64 = get_parsed("ROSETTA_RPC_TIMEOUT_SECS", 15)?;
        let rpc_timeout_secs = rpc_timeout_secs.clamp(1, 300);

        let log_level = env::var("ROSETTA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            rpc_url,
            rpc_user,
            rpc_pass,
            api_port,
            production,
            block_confirmations,
            tx_confirmations,
            rpc_timeout_secs,
            log_level,
        })
    }

    /// Upstream call timeout as a Duration
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Log a configuration summary (hiding credentials)
    pub fn log_summary(&self) {
        tracing::info!(
            rpc_url = %self.rpc_url,
            api_port = self.api_port,
            production = self.production,
            block_confirmations = self.block_confirmations,
            tx_confirmations = self.tx_confirmations,
            rpc_timeout_secs = self.rpc_timeout_secs,
            "configuration loaded"
        );
    }
}

/// Get a required env var
fn get_required(var_name: &str) -> Result<String, ConfigError> {
    env::var(var_name).map_err(|_| ConfigError::MissingEnvVar(var_name.to_string()))
}

/// Get an env var parsed into a numeric type, falling back to a default
fn get_parsed<T: std::str::FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(var_name) {
        Ok(value) => value.parse().map_err(|_| {
            ConfigError::InvalidValue(var_name.to_string(), format!("cannot parse: {}", value))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // env::set_var is process-global, so tests use scratch variable names
    // through the helpers instead of mutating the ROSETTA_* set.

    #[test]
    fn test_required_missing() {
        env::remove_var("ROSETTA_TEST_REQUIRED");
        assert!(matches!(
            get_required("ROSETTA_TEST_REQUIRED"),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_parsed_default_and_override() {
        env::remove_var("ROSETTA_TEST_PARSED");
        assert_eq!(get_parsed("ROSETTA_TEST_PARSED", 15u64).unwrap(), 15);

        env::set_var("ROSETTA_TEST_PARSED", "42");
        assert_eq!(get_parsed("ROSETTA_TEST_PARSED", 15u64).unwrap(), 42);

        env::set_var("ROSETTA_TEST_PARSED", "not-a-number");
        assert!(get_parsed("ROSETTA_TEST_PARSED", 15u64).is_err());
        env::remove_var("ROSETTA_TEST_PARSED");
    }
}
