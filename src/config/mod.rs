//! Configuration module for the skills console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the organization API the console fronts
    pub api_base_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Sessions unused for this long are signed out
    pub session_idle: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("CONSOLE_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let raw_addr =
            env::var("CONSOLE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid CONSOLE_BIND_ADDR {raw_addr}: {e}")))?;

        let log_level = env::var("CONSOLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let raw_format = env::var("CONSOLE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
        let log_format = LogFormat::parse(&raw_format).ok_or_else(|| {
            AppError::Config(format!("Invalid CONSOLE_LOG_FORMAT {raw_format}"))
        })?;

        let raw_idle =
            env::var("CONSOLE_SESSION_IDLE_MINUTES").unwrap_or_else(|_| "60".to_string());
        let session_idle = raw_idle
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .map(|minutes| Duration::from_secs(minutes * 60))
            .ok_or_else(|| {
                AppError::Config(format!("Invalid CONSOLE_SESSION_IDLE_MINUTES {raw_idle}"))
            })?;

        Ok(Self {
            api_base_url,
            bind_addr,
            log_level,
            log_format,
            session_idle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both scenarios live in one test since they mutate the same process env.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CONSOLE_API_BASE_URL");
        env::remove_var("CONSOLE_BIND_ADDR");
        env::remove_var("CONSOLE_LOG_LEVEL");
        env::remove_var("CONSOLE_LOG_FORMAT");
        env::remove_var("CONSOLE_SESSION_IDLE_MINUTES");

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.session_idle, Duration::from_secs(3600));

        env::set_var("CONSOLE_API_BASE_URL", "https://hr.example.com/");
        env::set_var("CONSOLE_LOG_FORMAT", "JSON");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://hr.example.com");
        assert_eq!(config.log_format, LogFormat::Json);

        env::set_var("CONSOLE_SESSION_IDLE_MINUTES", "15");
        assert_eq!(Config::from_env().unwrap().session_idle, Duration::from_secs(900));
        env::set_var("CONSOLE_SESSION_IDLE_MINUTES", "0");
        assert_eq!(Config::from_env().unwrap_err().error_code(), "CONFIG_ERROR");
        env::remove_var("CONSOLE_SESSION_IDLE_MINUTES");

        env::set_var("CONSOLE_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        env::remove_var("CONSOLE_API_BASE_URL");
        env::remove_var("CONSOLE_BIND_ADDR");
        env::remove_var("CONSOLE_LOG_FORMAT");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse(" json "), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("xml"), None);
    }
}
