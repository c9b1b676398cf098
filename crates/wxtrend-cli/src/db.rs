//! `db` subcommands: connectivity, schema, and data reset.

use clap::{Subcommand, ValueEnum};
use wxtrend_core::{TrendRecord, WeatherRecord};
use wxtrend_db::SeriesStore;

use crate::stores::StoreHandles;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that both databases answer
    Ping,
    /// Apply pending migrations to both databases
    Migrate,
    /// Delete stored points from both databases
    Clear {
        /// Which series kind to delete
        #[arg(long, value_enum, default_value_t = SeriesKind::All)]
        kind: SeriesKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesKind {
    Weather,
    Trends,
    All,
}

impl SeriesKind {
    fn includes_weather(self) -> bool {
        matches!(self, Self::Weather | Self::All)
    }

    fn includes_trends(self) -> bool {
        matches!(self, Self::Trends | Self::All)
    }
}

/// # Errors
///
/// Returns an error if either database fails the requested operation.
pub(crate) async fn run_db(stores: &StoreHandles, command: DbCommands) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            for (name, pool) in stores.named() {
                wxtrend_db::ping(pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("{name} database ping failed: {e}"))?;
                println!("{name}: ok");
            }
        }
        DbCommands::Migrate => {
            for (name, pool) in stores.named() {
                let applied = wxtrend_db::run_migrations(pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("{name} database migration failed: {e}"))?;
                tracing::info!(store = name, applied, "migrations complete");
                println!("{name}: applied {applied} migration(s)");
            }
        }
        DbCommands::Clear { kind } => {
            let store = stores.dual();
            if kind.includes_weather() {
                let removed = SeriesStore::<WeatherRecord>::clear(&store).await?;
                println!("weather: removed {removed} point(s)");
            }
            if kind.includes_trends() {
                let removed = SeriesStore::<TrendRecord>::clear(&store).await?;
                println!("trends: removed {removed} point(s)");
            }
        }
    }
    Ok(())
}
