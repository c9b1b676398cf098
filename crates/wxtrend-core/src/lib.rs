pub mod app_config;
pub mod config;
pub mod dates;
pub mod gaps;
pub mod locations;
pub mod series;
pub mod weeks;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::{DateRange, DayBound};
pub use gaps::{find_gaps, Gap};
pub use locations::{load_locations, Location, LocationsFile};
pub use series::{
    MalformedPoint, RawWeather, SeriesRecord, TrendKey, TrendRecord, WeatherKey, WeatherRecord,
};
pub use weeks::{week_start_of, week_starts, WEEK_START};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read locations file {path}: {source}")]
    LocationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations file: {0}")]
    LocationsFileParse(#[source] serde_yaml::Error),

    #[error("locations validation failed: {0}")]
    Validation(String),
}
