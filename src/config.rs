//! Connection pool configuration for [`PostgisEngine`](crate::engine::PostgisEngine).

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

use crate::error::Result;

/// PostGIS connection settings, typically deserialized from the host's configuration file.
///
/// Durations accept humantime strings such as `"30s"` or `"5m"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostgisOptions {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub idle_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub max_lifetime: Option<Duration>,
    pub test_before_acquire: bool,
}

impl Default for PostgisOptions {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost:5432/postgis".to_string(),
            max_connections: Some(10),
            min_connections: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            test_before_acquire: false,
        }
    }
}

impl PostgisOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Pool builder with every configured option applied. Unset options keep sqlx defaults.
    pub fn pool_options(&self) -> PgPoolOptions {
        let mut options = PgPoolOptions::new();
        if let Some(n) = self.max_connections {
            options = options.max_connections(n);
        }
        if let Some(n) = self.min_connections {
            options = options.min_connections(n);
        }
        if let Some(t) = self.acquire_timeout {
            options = options.acquire_timeout(t);
        }
        if let Some(t) = self.idle_timeout {
            options = options.idle_timeout(t);
        }
        if let Some(t) = self.max_lifetime {
            options = options.max_lifetime(t);
        }
        if self.test_before_acquire {
            options = options.test_before_acquire(true);
        }
        options
    }

    /// Open a pool and wait for the first connection.
    pub async fn connect(&self) -> Result<PgPool> {
        debug!(
            max_connections = ?self.max_connections,
            acquire_timeout = ?self.acquire_timeout,
            "connecting to postgis"
        );
        Ok(self.pool_options().connect(&self.url).await?)
    }
}
