use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, std::string::String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// How error envelopes map to HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    /// Every JSON envelope is answered with 200, old clients rely on it
    Legacy,
    /// 400 for bad input, 404 for missing data, 500 for the database
    Semantic,
}

impl FromStr for StatusMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(StatusMode::Legacy),
            "semantic" => Ok(StatusMode::Semantic),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    bind_addr: SocketAddr,
    store_backend: StoreBackend,
    database_url: Option<String>,
    database_max_connections: u32,
    database_timeout_ms: u64,
    status_mode: StatusMode,
    max_body_bytes: usize,
    recent_limit: i64,
    log_level: String,
}

impl Config {
    /// Reads `.env` (if any) and the process environment
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = parse_or(&lookup, "STORE_BACKEND", StoreBackend::Postgres)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5000)))?;
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        let database_timeout_ms = parse_or(&lookup, "DATABASE_TIMEOUT_MS", 5000u64)?;
        let status_mode = parse_or(&lookup, "STATUS_CODES", StatusMode::Legacy)?;
        let max_body_bytes = parse_or(&lookup, "MAX_BODY_BYTES", 4096usize)?;
        let recent_limit = parse_or(&lookup, "RECENT_LIMIT", 50i64)?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS", "0".to_owned()));
        }
        if recent_limit < 1 {
            return Err(ConfigError::Invalid("RECENT_LIMIT", recent_limit.to_string()));
        }

        Ok(Config {
            bind_addr,
            store_backend,
            database_url,
            database_max_connections,
            database_timeout_ms,
            status_mode,
            max_body_bytes,
            recent_limit,
            log_level,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_millis(self.database_timeout_ms)
    }

    pub fn status_mode(&self) -> StatusMode {
        self.status_mode
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn recent_limit(&self) -> i64 {
        self.recent_limit
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/hydro")]))
                .unwrap();

        assert_eq!(StoreBackend::Postgres, config.store_backend());
        assert_eq!(Some("postgres://localhost/hydro"), config.database_url());
        assert_eq!("0.0.0.0:5000", config.bind_addr().to_string());
        assert_eq!(Duration::from_millis(5000), config.database_timeout());
        assert_eq!(StatusMode::Legacy, config.status_mode());
        assert_eq!(4096, config.max_body_bytes());
        assert_eq!(50, config.recent_limit());
        assert_eq!("info", config.log_level());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let res = Config::from_lookup(lookup_from(&[]));

        assert!(matches!(res, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_memory_backend_without_database() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("STATUS_CODES", "semantic"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert_eq!(StoreBackend::Memory, config.store_backend());
        assert_eq!(None, config.database_url());
        assert_eq!(StatusMode::Semantic, config.status_mode());
        assert_eq!(8080, config.bind_addr().port());
    }

    #[test]
    fn test_invalid_values() {
        let res = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("DATABASE_TIMEOUT_MS", "soon"),
        ]));
        assert!(matches!(res, Err(ConfigError::Invalid("DATABASE_TIMEOUT_MS", _))));

        let res = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "mysql")]));
        assert!(matches!(res, Err(ConfigError::Invalid("STORE_BACKEND", _))));

        let res = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("RECENT_LIMIT", "0"),
        ]));
        assert!(matches!(res, Err(ConfigError::Invalid("RECENT_LIMIT", _))));
    }
}
