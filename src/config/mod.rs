//! Startup configuration from the environment, plus the optional seed file.

pub mod seed;

pub use seed::{apply_seed, load_seed, SeedFile};

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5555";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process tables; contents are lost on exit.
    Memory,
    Postgres { url: String, max_connections: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub seed_path: Option<String>,
    pub body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections: u32 = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        let backend = match get("DATABASE_URL") {
            None => StoreBackend::Memory,
            Some(url) if url == "memory" => StoreBackend::Memory,
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                StoreBackend::Postgres { url, max_connections }
            }
            Some(_) => {
                return Err(ConfigError::InvalidVar {
                    var: "DATABASE_URL",
                    reason: "expected `memory` or a postgres:// url".into(),
                })
            }
        };

        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: "BODY_LIMIT_BYTES",
                reason: e.to_string(),
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Settings {
            bind_addr,
            backend,
            seed_path: get("SEED_PATH"),
            body_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.port(), 5555);
        assert_eq!(s.backend, StoreBackend::Memory);
        assert_eq!(s.seed_path, None);
        assert_eq!(s.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn postgres_url_selects_postgres() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/missions"),
            ("DB_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            s.backend,
            StoreBackend::Postgres {
                url: "postgres://localhost/missions".into(),
                max_connections: 12
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("BIND_ADDR", "nope")]).is_err());
        assert!(settings(&[("DATABASE_URL", "mysql://x/y")]).is_err());
        assert!(settings(&[("BODY_LIMIT_BYTES", "-1")]).is_err());
        assert!(matches!(
            settings(&[("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidVar { var: "DB_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn blank_values_are_unset() {
        let s = settings(&[("SEED_PATH", "  "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(s.seed_path, None);
        assert_eq!(s.backend, StoreBackend::Memory);
    }
}
