//! Series read commands. Each prints its result to stdout as JSON.

use chrono::NaiveDate;
use serde::Serialize;
use wxtrend_cache::TimeSeriesCache;
use wxtrend_collector::HttpCollector;
use wxtrend_core::{AppConfig, Location, LocationsFile};
use wxtrend_db::{DualStore, PgStore};

use crate::stores::StoreHandles;

type Cache = TimeSeriesCache<DualStore<PgStore, PgStore>, HttpCollector>;

fn build_cache(config: &AppConfig, stores: &StoreHandles) -> anyhow::Result<Cache> {
    let collector = HttpCollector::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build collector client: {e}"))?;
    Ok(TimeSeriesCache::new(stores.dual(), collector))
}

fn resolve_location<'a>(
    config: &AppConfig,
    locations: &'a LocationsFile,
    geo: &str,
) -> anyhow::Result<&'a Location> {
    locations.find(geo).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown location '{geo}'; add it to {}",
            config.locations_path.display()
        )
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// # Errors
///
/// Returns an error if the location is not registered or the cache fails.
pub(crate) async fn run_weather(
    config: &AppConfig,
    stores: &StoreHandles,
    geo: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    let locations = wxtrend_core::load_locations(&config.locations_path)?;
    let location = resolve_location(config, &locations, geo)?;
    let cache = build_cache(config, stores)?;

    let records = cache.get_weather(location, start, end).await?;
    print_json(&records)
}

/// Trend series are not tied to the locations file; any region code works.
///
/// # Errors
///
/// Returns an error if the cache fails.
pub(crate) async fn run_trends(
    config: &AppConfig,
    stores: &StoreHandles,
    keyword: &str,
    geo: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    let cache = build_cache(config, stores)?;
    let geo_code = geo.to_ascii_uppercase();

    let records = cache.get_trends(keyword, &geo_code, start, end).await?;
    print_json(&records)
}

/// # Errors
///
/// Returns an error if the location is not registered or either series fails.
pub(crate) async fn run_series(
    config: &AppConfig,
    stores: &StoreHandles,
    keyword: &str,
    geo: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    let locations = wxtrend_core::load_locations(&config.locations_path)?;
    let location = resolve_location(config, &locations, geo)?;
    let cache = build_cache(config, stores)?;

    let both = cache
        .get_weather_and_trends(location, keyword, start, end)
        .await?;
    print_json(&both)
}
