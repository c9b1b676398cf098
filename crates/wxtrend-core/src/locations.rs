use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::series::{TrendKey, WeatherKey};
use crate::ConfigError;

/// A location tracked by both series.
///
/// Weather and trends are stored under `geo_code`; the weather collector is
/// queried with `weather_query`, which names a city rather than a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub geo_code: String,
    pub weather_query: String,
}

impl Location {
    #[must_use]
    pub fn weather_key(&self) -> WeatherKey {
        WeatherKey::new(self.geo_code.clone())
    }

    #[must_use]
    pub fn trend_key(&self, keyword: &str) -> TrendKey {
        TrendKey::new(keyword, self.geo_code.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationsFile {
    pub locations: Vec<Location>,
}

impl LocationsFile {
    /// Look up a location by geo code, case-insensitively.
    #[must_use]
    pub fn find(&self, geo_code: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|l| l.geo_code.eq_ignore_ascii_case(geo_code))
    }
}

/// Load and validate the locations configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_locations(path: &Path) -> Result<LocationsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_locations(&content)
}

fn parse_locations(content: &str) -> Result<LocationsFile, ConfigError> {
    let locations_file: LocationsFile =
        serde_yaml::from_str(content).map_err(ConfigError::LocationsFileParse)?;

    validate_locations(&locations_file)?;

    Ok(locations_file)
}

fn validate_locations(locations_file: &LocationsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for location in &locations_file.locations {
        if location.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location name must be non-empty".to_string(),
            ));
        }

        if location.geo_code.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' has an empty geo_code",
                location.name
            )));
        }

        if location.weather_query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' has an empty weather_query",
                location.name
            )));
        }

        if !seen_codes.insert(location.geo_code.to_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate geo_code: '{}' (from location '{}')",
                location.geo_code, location.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "locations_test.rs"]
mod tests;
