//! Configuration for the tracker server, read from environment variables

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Postgres URL; the server keeps state in memory when unset
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub email: String,
    /// Admin login is refused for everyone while unset
    pub password: Option<String>,
    /// HS256 signing secret; required whenever `password` is set
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{name} must be set when {required_by} is set")]
    MissingValue {
        name: &'static str,
        required_by: &'static str,
    },
}

/// Accepted range for `JWT_EXPIRATION_HOURS` (one hour to one year)
pub const JWT_EXPIRATION_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=8760;

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Recognised variables: `HOST`, `PORT`, `DATABASE_URL`,
    /// `DATABASE_MAX_CONNECTIONS`, `ADMIN_EMAIL`, `ADMIN_PASSWORD`,
    /// `JWT_SECRET`, `JWT_EXPIRATION_HOURS`. Empty values count as unset.
    ///
    /// `JWT_SECRET` is required once `ADMIN_PASSWORD` is set; there is no
    /// built-in signing secret.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let password = var("ADMIN_PASSWORD");
        let jwt_secret = var("JWT_SECRET");
        if password.is_some() && jwt_secret.is_none() {
            return Err(ConfigError::MissingValue {
                name: "JWT_SECRET",
                required_by: "ADMIN_PASSWORD",
            });
        }

        let jwt_expiration_hours = parse_or(
            "JWT_EXPIRATION_HOURS",
            var("JWT_EXPIRATION_HOURS"),
            defaults.admin.jwt_expiration_hours,
        )?;
        if !JWT_EXPIRATION_HOURS_RANGE.contains(&jwt_expiration_hours) {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRATION_HOURS",
                value: jwt_expiration_hours.to_string(),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or(defaults.server.host),
                port: parse_or("PORT", var("PORT"), defaults.server.port)?,
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL"),
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    defaults.database.max_connections,
                )?,
            },
            admin: AdminConfig {
                email: var("ADMIN_EMAIL").unwrap_or(defaults.admin.email),
                password,
                jwt_secret,
                jwt_expiration_hours,
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            value: self.server.host.clone(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
            },
            admin: AdminConfig {
                email: "admin@lab.local".to_string(),
                password: None,
                jwt_secret: None,
                jwt_expiration_hours: 12,
            },
        }
    }
}
