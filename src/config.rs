//! Runtime configuration read from the environment.

use anyhow::{anyhow, Context};
use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 15;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub router: RouterConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub host: IpAddr,
    pub port: u16,
    pub shutdown_timeout: Duration,
}

impl RouterConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let router = RouterConfig {
            host: parse_or(&lookup, "ROUTER_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "ROUTER_PORT", DEFAULT_PORT)?,
            shutdown_timeout: Duration::from_secs(parse_or(
                &lookup,
                "ROUTER_SHUTDOWN_TIMEOUT",
                DEFAULT_SHUTDOWN_TIMEOUT,
            )?),
        };

        let database = DatabaseConfig {
            url: database_url(&lookup)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
        };

        Ok(Config { router, database })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|error| anyhow!("{key} is invalid: {error}"))
            .inspect_err(|error| error!("{error}")),
        None => Ok(default),
    }
}

fn database_url<F>(lookup: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }

    let var = |key: &str| {
        lookup(key)
            .with_context(|| format!("neither DATABASE_URL nor {key} is set"))
            .inspect_err(|error| error!("{error}"))
    };

    let host = var("POSTGRES_HOST")?;
    let port = var("POSTGRES_PORT")?;
    let user = var("POSTGRES_USER")?;
    let password = var("POSTGRES_PASSWORD")?;
    let db = var("POSTGRES_DB")?;
    let sslmode = lookup("POSTGRES_SSLMODE").unwrap_or_else(|| "disable".to_owned());

    Ok(format!(
        "postgres://{user}:{password}@{host}:{port}/{db}?sslmode={sslmode}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/reviews")]).unwrap();

        assert_eq!(config.router.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.router.shutdown_timeout, Duration::from_secs(15));
        assert_eq!(config.database.url, "postgres://localhost/reviews");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ROUTER_HOST", "127.0.0.1"),
            ("ROUTER_PORT", "3000"),
            ("ROUTER_SHUTDOWN_TIMEOUT", "2"),
            ("DATABASE_MAX_CONNECTIONS", "1"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(config.router.addr(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.router.shutdown_timeout, Duration::from_secs(2));
        assert_eq!(config.database.max_connections, 1);
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn url_from_postgres_parts() {
        let config = config(&[
            ("POSTGRES_HOST", "db"),
            ("POSTGRES_PORT", "5432"),
            ("POSTGRES_USER", "reviewer"),
            ("POSTGRES_PASSWORD", "secret"),
            ("POSTGRES_DB", "reviews"),
        ])
        .unwrap();

        assert_eq!(
            config.database.url,
            "postgres://reviewer:secret@db:5432/reviews?sslmode=disable"
        );
    }

    #[test]
    fn missing_database_settings() {
        assert!(config(&[("POSTGRES_HOST", "db")]).is_err());
    }

    #[test]
    fn invalid_port() {
        assert!(config(&[("DATABASE_URL", "sqlite::memory:"), ("ROUTER_PORT", "http")]).is_err());
    }
}
