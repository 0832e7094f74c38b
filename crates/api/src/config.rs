//! Process configuration read from the environment.

use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Postgres connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    pub max_db_connections: u32,
}

impl ApiConfig {
    /// Load configuration from process environment variables.
    ///
    /// Variables: `BIND_ADDR`, `JWT_SECRET`, `DATABASE_URL`,
    /// `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_db_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_DB_CONNECTIONS,
        };
        anyhow::ensure!(max_db_connections > 0, "DATABASE_MAX_CONNECTIONS must be at least 1");

        Ok(Self {
            bind_addr,
            jwt_secret,
            database_url,
            max_db_connections,
        })
    }
}
