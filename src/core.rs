//! Core QueryDao functionality
//!
//! [`QueryDao`] owns the connection pool and hands out data-access facades bound
//! to it.

use dao_object::{Dao, PgStore};
use sqlx::PgPool;
use std::time::Duration;

use crate::errors::QueryDaoError;
use crate::{debug_log, trace_log};
use config::{AppConfig, DaoConfig, DatabaseConfig};

/// Connection pool plus the facade defaults
pub struct QueryDao {
    pool: PgPool,
    dao_config: DaoConfig,
}

impl QueryDao {
    /// Connect with the default facade settings
    pub async fn new(config: DatabaseConfig) -> Result<Self, QueryDaoError> {
        let pool = Self::connect(&config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Connect using a loaded [`AppConfig`]
    pub async fn with_config(config: AppConfig) -> Result<Self, QueryDaoError> {
        let pool = Self::connect(&config.database).await?;
        Ok(Self::from_pool(pool).with_dao_config(config.dao))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            dao_config: DaoConfig::default(),
        }
    }

    pub fn with_dao_config(mut self, dao_config: DaoConfig) -> Self {
        self.dao_config = dao_config.normalized();
        self
    }

    async fn connect(config: &DatabaseConfig) -> Result<PgPool, QueryDaoError> {
        let connection_string = config.connection_string();
        debug_log!(
            "Connecting to {}:{}/{} (max {} connections)",
            config.host,
            config.port,
            config.database,
            config.max_connections
        );

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        trace_log!("Pool ready with {} connections", pool.size());
        Ok(pool)
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn dao_config(&self) -> &DaoConfig {
        &self.dao_config
    }

    /// A facade over this pool; cheap to call repeatedly
    pub fn dao(&self) -> Dao<PgStore> {
        Dao::with_config(PgStore::new(self.pool.clone()), self.dao_config.clone())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QueryDaoError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        debug_log!("Closing connection pool");
        self.pool.close().await;
    }
}
