//! Centralized configuration for Spigot.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Spigot components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct SpigotConfig {
    pub server: ServerConfig,
    pub fetch: FetchConfig,
    pub delivery: DeliveryConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the API server to
    pub host: String,
    /// Port to bind the API server to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Outbound HTTP fetch configuration.
///
/// Controls how Spigot talks to the media CDN when proxying stream bytes.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Connection timeout for media CDN requests
    pub connect_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            user_agent: "spigot/0.1.0",
        }
    }
}

/// Delivery adapter configuration.
///
/// Controls where persisted downloads land and how much data the
/// buffer-and-encode delivery mode may hold in memory.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Directory for persisted downloads
    pub download_dir: PathBuf,
    /// Maximum bytes the inline delivery mode may buffer in memory
    pub max_inline_bytes: u64,
    /// Temporary file suffix used while a download is in flight
    pub temp_file_suffix: &'static str,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("./downloads"),
            max_inline_bytes: 256 * 1024 * 1024, // 256 MiB
            temp_file_suffix: ".tmp",
        }
    }
}

impl SpigotConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SPIGOT_HOST") {
            if !host.is_empty() {
                config.server.host = host;
            }
        }

        if let Ok(port) = std::env::var("SPIGOT_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(dir) = std::env::var("SPIGOT_DOWNLOAD_DIR") {
            if !dir.is_empty() {
                config.delivery.download_dir = PathBuf::from(dir);
            }
        }

        if let Ok(max) = std::env::var("SPIGOT_MAX_INLINE_BYTES") {
            if let Ok(bytes) = max.parse::<u64>() {
                config.delivery.max_inline_bytes = bytes;
            }
        }

        if let Ok(timeout) = std::env::var("SPIGOT_FETCH_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.fetch.connect_timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Uses a tiny inline buffer cap so limit handling is easy to exercise.
    pub fn for_testing() -> Self {
        Self {
            delivery: DeliveryConfig {
                download_dir: std::env::temp_dir().join("spigot-tests"),
                max_inline_bytes: 64 * 1024, // 64 KiB
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SpigotConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.delivery.download_dir, PathBuf::from("./downloads"));
        assert_eq!(config.delivery.max_inline_bytes, 256 * 1024 * 1024);
        assert_eq!(config.delivery.temp_file_suffix, ".tmp");
    }

    #[test]
    fn test_testing_preset() {
        let config = SpigotConfig::for_testing();

        assert_eq!(config.delivery.max_inline_bytes, 64 * 1024);
        assert!(config.delivery.download_dir.ends_with("spigot-tests"));
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("SPIGOT_HOST", "0.0.0.0");
            std::env::set_var("SPIGOT_PORT", "8080");
            std::env::set_var("SPIGOT_DOWNLOAD_DIR", "/tmp/spigot");
            std::env::set_var("SPIGOT_MAX_INLINE_BYTES", "1024");
            std::env::set_var("SPIGOT_FETCH_TIMEOUT", "5");
        }

        let config = SpigotConfig::from_env();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.delivery.download_dir, PathBuf::from("/tmp/spigot"));
        assert_eq!(config.delivery.max_inline_bytes, 1024);
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(5));

        // Cleanup
        unsafe {
            std::env::remove_var("SPIGOT_HOST");
            std::env::remove_var("SPIGOT_PORT");
            std::env::remove_var("SPIGOT_DOWNLOAD_DIR");
            std::env::remove_var("SPIGOT_MAX_INLINE_BYTES");
            std::env::remove_var("SPIGOT_FETCH_TIMEOUT");
        }
    }
}
