use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Where student records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process memory; contents are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest request body accepted, in bytes (default: 64 KiB).
    pub max_body_bytes: usize,
    /// Record store backend (default: postgres).
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    /// Pool size for PostgreSQL (default: `20`).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
            storage: StorageBackend::Postgres,
            database_url: None,
            db_max_connections: 20,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_BODY_BYTES`       | `65536`                    |
    /// | `STORAGE_BACKEND`      | `postgres`                 |
    /// | `DATABASE_URL`         | (required for postgres)    |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `LOG_FORMAT`           | `pretty`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_origins,
        };

        let storage = parse_or("STORAGE_BACKEND", &lookup, defaults.storage)?;
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let max_body_bytes = parse_or("MAX_BODY_BYTES", &lookup, defaults.max_body_bytes)?;
        if max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_BODY_BYTES",
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            host: parse_or("HOST", &lookup, defaults.host)?,
            port: parse_or("PORT", &lookup, defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                &lookup,
                defaults.request_timeout_secs,
            )?,
            max_body_bytes,
            storage,
            database_url,
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                &lookup,
                defaults.db_max_connections,
            )?,
            log_format: parse_or("LOG_FORMAT", &lookup, defaults.log_format)?,
        })
    }
}

fn parse_or<T>(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    for origin in &origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{origin}' is not a valid origin"),
            });
        }
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins, ["http://localhost:5173"]);
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));

        let config = load(&[("DATABASE_URL", "postgres://localhost/gradebook")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("STORAGE_BACKEND", "memory"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_fail_fast() {
        assert_matches!(
            load(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("STORAGE_BACKEND", "sqlite")]),
            Err(ConfigError::Invalid { var: "STORAGE_BACKEND", .. })
        );
        assert_matches!(
            load(&[("STORAGE_BACKEND", "memory"), ("MAX_BODY_BYTES", "0")]),
            Err(ConfigError::Invalid { var: "MAX_BODY_BYTES", .. })
        );
    }
}
