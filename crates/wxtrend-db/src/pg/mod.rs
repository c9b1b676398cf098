//! Postgres-backed series storage.
//!
//! Each record kind lives in its own table with a unique constraint on the
//! natural key, so a replace is a single `INSERT … ON CONFLICT DO UPDATE`.

mod trends;
mod weather;

use sqlx::PgPool;

pub use trends::TrendPointRow;
pub use weather::WeatherPointRow;

/// A handle to one Postgres database holding both series tables.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
