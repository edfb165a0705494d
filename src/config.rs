use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout_secs: u64,
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "eventhub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "eventhub-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 120),
        };
        Ok(Self {
            database_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            min_connections: env_or("DB_MIN_CONNECTIONS", 0),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 300),
            jwt,
        })
    }

    /// Pool bounds. Idle connections above the minimum are closed after the timeout.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn pool_options_carry_configured_bounds() {
        let mut config = (*AppState::fake().config).clone();
        config.max_connections = 10;
        config.min_connections = 5;
        config.idle_timeout_secs = 30;

        let opts = config.pool_options();
        assert_eq!(opts.get_max_connections(), 10);
        assert_eq!(opts.get_min_connections(), 5);
        assert_eq!(opts.get_idle_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn min_connections_never_exceed_max() {
        let mut config = (*AppState::fake().config).clone();
        config.max_connections = 2;
        config.min_connections = 8;

        assert_eq!(config.pool_options().get_min_connections(), 2);
    }
}
