//! Environment-backed configuration.

use anyhow::Context;
use chrono::Duration;

use keyward_auth::DEFAULT_TOKEN_TTL_HOURS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bind_addr: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required. `JWT_SECRET` falls back to an insecure
    /// dev default with a warning. `TOKEN_TTL_HOURS` defaults to 24 and
    /// `BIND_ADDR` to `0.0.0.0:8080`.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let ttl_hours = match std::env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .context("TOKEN_TTL_HOURS must be an integer number of hours")?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };
        anyhow::ensure!(ttl_hours > 0, "TOKEN_TTL_HOURS must be positive");

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl: Duration::hours(ttl_hours),
            bind_addr,
        })
    }
}
