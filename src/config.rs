//! Configuration handling for the Spanner MCP Server.
//!
//! This module provides configuration management via CLI arguments and environment variables.

use clap::Parser;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Schema changes can backfill indexes, so they get a much longer budget.
pub const DEFAULT_DDL_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Parser)]
#[command(name = "spanner-mcp-server", version, about)]
pub struct Config {
    /// Timeout in seconds for plan and DDL fetch requests
    #[arg(
        long = "request-timeout",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        env = "MCP_REQUEST_TIMEOUT"
    )]
    pub request_timeout: u64,

    /// Timeout in seconds for waiting on schema updates to complete
    #[arg(
        long = "ddl-timeout",
        default_value_t = DEFAULT_DDL_TIMEOUT_SECS,
        env = "MCP_DDL_TIMEOUT"
    )]
    pub ddl_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            ddl_timeout: DEFAULT_DDL_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Get the DDL timeout as a Duration.
    pub fn ddl_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.ddl_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.ddl_timeout, DEFAULT_DDL_TIMEOUT_SECS);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_timeout_durations() {
        let config = Config {
            request_timeout: 45,
            ddl_timeout: 1200,
            ..Config::default()
        };
        assert_eq!(config.request_timeout_duration(), Duration::from_secs(45));
        assert_eq!(config.ddl_timeout_duration(), Duration::from_secs(1200));
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "spanner-mcp-server",
            "--request-timeout",
            "10",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.ddl_timeout, DEFAULT_DDL_TIMEOUT_SECS);
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_parse_rejects_non_numeric_timeout() {
        let result =
            Config::try_parse_from(["spanner-mcp-server", "--ddl-timeout", "forever"]);
        assert!(result.is_err());
    }
}
