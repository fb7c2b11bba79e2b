//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `WRITE_DATABASE_URL` — write store connection string (optional)
/// - `READ_DATABASE_URL` — read store connection string (optional)
///
/// The two connection strings are independent; the process falls back to
/// in-memory stores unless both are set.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub write_database_url: Option<String>,
    pub read_database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            write_database_url: std::env::var("WRITE_DATABASE_URL").ok(),
            read_database_url: std::env::var("READ_DATABASE_URL").ok(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns both connection strings when fully configured for
    /// database-backed stores.
    pub fn database_urls(&self) -> Option<(&str, &str)> {
        match (&self.write_database_url, &self.read_database_url) {
            (Some(write), Some(read)) => Some((write.as_str(), read.as_str())),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            write_database_url: None,
            read_database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.database_urls().is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    #[serial]
    fn test_database_urls_require_both_strings() {
        unsafe {
            std::env::set_var("WRITE_DATABASE_URL", "postgres://localhost/write");
            std::env::remove_var("READ_DATABASE_URL");
        }
        let config = Config::from_env();
        assert!(config.database_urls().is_none());

        unsafe {
            std::env::set_var("READ_DATABASE_URL", "postgres://localhost/read");
        }
        let config = Config::from_env();
        assert_eq!(
            config.database_urls(),
            Some(("postgres://localhost/write", "postgres://localhost/read"))
        );

        unsafe {
            std::env::remove_var("WRITE_DATABASE_URL");
            std::env::remove_var("READ_DATABASE_URL");
        }
    }
}
