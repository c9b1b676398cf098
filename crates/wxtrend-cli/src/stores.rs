//! Database handles shared by every command.

use sqlx::PgPool;
use wxtrend_core::AppConfig;
use wxtrend_db::{DualStore, PgStore, PoolConfig};

/// Both connection pools, opened once at startup.
pub(crate) struct StoreHandles {
    pub(crate) primary: PgPool,
    pub(crate) secondary: PgPool,
}

impl StoreHandles {
    /// Connect to the primary and secondary databases.
    ///
    /// # Errors
    ///
    /// Returns an error naming the database that could not be reached.
    pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool_config = PoolConfig::from_app_config(config);
        let primary = wxtrend_db::connect_pool(&config.database_url, pool_config)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to primary database: {e}"))?;
        let secondary = wxtrend_db::connect_pool(&config.secondary_database_url, pool_config)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to secondary database: {e}"))?;
        tracing::debug!(
            max_connections = pool_config.max_connections,
            "connected to primary and secondary databases"
        );
        Ok(Self { primary, secondary })
    }

    /// Each pool with a label for operator output.
    pub(crate) fn named(&self) -> [(&'static str, &PgPool); 2] {
        [("primary", &self.primary), ("secondary", &self.secondary)]
    }

    pub(crate) fn dual(&self) -> DualStore<PgStore, PgStore> {
        DualStore::new(
            PgStore::new(self.primary.clone()),
            PgStore::new(self.secondary.clone()),
        )
    }
}
