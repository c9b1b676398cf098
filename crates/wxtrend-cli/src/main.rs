mod db;
mod series;
mod stores;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::stores::StoreHandles;

#[derive(Debug, Parser)]
#[command(name = "wxtrend")]
#[command(about = "Weekly weather and search-interest series, cached in two databases")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Print weekly weather for a registered location as JSON
    Weather {
        /// Geo code from the locations file (e.g., GB)
        #[arg(long)]
        geo: String,
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Print weekly search interest for a keyword as JSON
    Trends {
        #[arg(long)]
        keyword: String,
        /// Region code (e.g., GB, US-WA)
        #[arg(long)]
        geo: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Print weather and search interest for one location as JSON
    Series {
        #[arg(long)]
        keyword: String,
        /// Geo code from the locations file (e.g., GB)
        #[arg(long)]
        geo: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("wxtrend: no command given; run with --help for usage");
        return Ok(());
    };

    let config = wxtrend_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries JSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(
        env = %config.env,
        locations = %config.locations_path.display(),
        collector = %config.collector_url,
        "configuration loaded"
    );

    let stores = StoreHandles::connect(&config).await?;

    match command {
        Commands::Db { command } => db::run_db(&stores, command).await,
        Commands::Weather { geo, start, end } => {
            series::run_weather(&config, &stores, &geo, start, end).await
        }
        Commands::Trends {
            keyword,
            geo,
            start,
            end,
        } => series::run_trends(&config, &stores, &keyword, &geo, start, end).await,
        Commands::Series {
            keyword,
            geo,
            start,
            end,
        } => series::run_series(&config, &stores, &keyword, &geo, start, end).await,
    }
}
