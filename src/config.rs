//! Runtime configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_POOL_SIZE: u32 = 50;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub connect_options: PgConnectOptions,
    pub pool_size: u32,
}

/// Output format for the log subscriber, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub bind_addr: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `DATABASE_URL` wins over the individual `DB_*` parts when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let connect_options = match var("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|_| ConfigError::InvalidVar {
                name: "DATABASE_URL",
                value: url,
            })?,
            None => {
                let mut opts = PgConnectOptions::new()
                    .host(&var("DB_HOST").unwrap_or_else(|| "localhost".into()))
                    .port(parse_or(&var, "DB_PORT", 5432u16)?)
                    .username(&var("DB_USER").unwrap_or_else(|| "postgres".into()))
                    .database(&var("DB_NAME").unwrap_or_else(|| "emp".into()));
                if let Some(password) = var("DB_PASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        let pool_size = parse_or(&var, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidVar {
                name: "DB_POOL_SIZE",
                value: "0".into(),
            });
        }

        Ok(AppConfig {
            db: DbConfig {
                connect_options,
                pool_size,
            },
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&var, "PORT", DEFAULT_PORT)?,
            body_limit_bytes: parse_or(&var, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
            log_format: parse_or(&var, "LOG_FORMAT", LogFormat::default())?,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_addr, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidVar {
            name: "BIND_ADDR",
            value: self.bind_addr.clone(),
        })
    }
}

fn parse_or<F, T>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar { name, value }),
        None => Ok(default),
    }
}
