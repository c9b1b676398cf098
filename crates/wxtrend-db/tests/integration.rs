//! Offline unit tests for wxtrend-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use wxtrend_core::{AppConfig, Environment, TrendRecord, WeatherRecord};
use wxtrend_db::pg::{TrendPointRow, WeatherPointRow};
use wxtrend_db::PoolConfig;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://primary".to_string(),
        secondary_database_url: "postgres://secondary".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        locations_path: PathBuf::from("./config/locations.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        collector_url: "http://localhost:8088".to_string(),
        collector_timeout_secs: 30,
        collector_user_agent: "ua".to_string(),
        collector_max_retries: 3,
        collector_retry_backoff_base_ms: 1000,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn weather_row_converts_to_record() {
    let observed_at = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
    let row = WeatherPointRow {
        id: 1,
        geo_code: "GB".to_string(),
        observed_at,
        temperature: 9,
        description: "Overcast".to_string(),
        precipitation: 12.5,
        sunshine: 2.0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let record = WeatherRecord::from(row);
    assert_eq!(record.geo_code, "GB");
    assert_eq!(record.observed_at, observed_at);
    assert_eq!(record.temperature, 9);
    assert_eq!(record.description, "Overcast");
}

#[test]
fn trend_row_converts_to_record() {
    let observed_at = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
    let row = TrendPointRow {
        id: 1,
        keyword: "raincoat".to_string(),
        geo_code: "NL".to_string(),
        observed_at,
        interest: 64,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let record = TrendRecord::from(row);
    assert_eq!(record.keyword, "raincoat");
    assert_eq!(record.geo_code, "NL");
    assert_eq!(record.interest, 64);
}
