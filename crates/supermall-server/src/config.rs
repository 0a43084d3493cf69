// ABOUTME: Configuration loading for the supermall server.
// ABOUTME: Reads SUPERMALL_* environment variables with local-demo defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SUPERMALL_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
    pub simulate_latency: bool,
    pub seed_sample_data: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - SUPERMALL_HOME: data directory for the storage area (default: ~/.supermall)
    /// - SUPERMALL_BIND: socket address to bind (default: 127.0.0.1:7878)
    /// - SUPERMALL_LATENCY: simulate backend latency (default: true)
    /// - SUPERMALL_SEED: seed sample data on first run (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = std::env::var("SUPERMALL_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/tmp"))
                    .join(".supermall")
            });

        let bind_str =
            std::env::var("SUPERMALL_BIND").unwrap_or_else(|_| "127.0.0.1:7878".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let simulate_latency = std::env::var("SUPERMALL_LATENCY")
            .map(|v| v != "false" && v != "0" && v != "no")
            .unwrap_or(true);

        let seed_sample_data = std::env::var("SUPERMALL_SEED")
            .map(|v| v != "false" && v != "0" && v != "no")
            .unwrap_or(true);

        Ok(Self {
            home,
            bind,
            simulate_latency,
            seed_sample_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_loads_defaults() {
        // SAFETY: test-only code, single-threaded test execution
        unsafe {
            std::env::remove_var("SUPERMALL_HOME");
            std::env::remove_var("SUPERMALL_BIND");
            std::env::remove_var("SUPERMALL_LATENCY");
            std::env::remove_var("SUPERMALL_SEED");
        }

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.bind, "127.0.0.1:7878".parse::<SocketAddr>().unwrap());
        assert!(config.simulate_latency);
        assert!(config.seed_sample_data);
        assert!(config.home.to_string_lossy().contains(".supermall"));
    }

    #[test]
    fn config_rejects_a_malformed_bind() {
        // SAFETY: test-only code, single-threaded test execution
        unsafe {
            std::env::set_var("SUPERMALL_BIND", "not-an-address");
        }

        let result = ServerConfig::from_env();

        // SAFETY: test-only code, single-threaded test execution
        unsafe {
            std::env::remove_var("SUPERMALL_BIND");
        }

        assert!(result.is_err(), "should reject a bad bind address");
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("not-an-address"),
            "error should echo the value: {}",
            err
        );
    }
}
