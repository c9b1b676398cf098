use super::*;

const VALID: &str = r"
locations:
  - name: UK
    geo_code: GB
    weather_query: london,united+kingdom
  - name: Netherlands
    geo_code: NL
    weather_query: amsterdam
";

#[test]
fn parses_valid_file() {
    let file = parse_locations(VALID).unwrap();
    assert_eq!(file.locations.len(), 2);
    assert_eq!(file.locations[0].geo_code, "GB");
    assert_eq!(file.locations[1].weather_query, "amsterdam");
}

#[test]
fn find_is_case_insensitive() {
    let file = parse_locations(VALID).unwrap();
    let nl = file.find("nl").expect("NL should be found");
    assert_eq!(nl.name, "Netherlands");
    assert!(file.find("JP").is_none());
}

#[test]
fn location_builds_series_keys() {
    let file = parse_locations(VALID).unwrap();
    let gb = file.find("GB").unwrap();
    assert_eq!(gb.weather_key(), WeatherKey::new("GB"));
    assert_eq!(gb.trend_key("umbrella"), TrendKey::new("umbrella", "GB"));
}

#[test]
fn rejects_duplicate_geo_codes() {
    let yaml = r"
locations:
  - name: UK
    geo_code: GB
    weather_query: london
  - name: Britain
    geo_code: gb
    weather_query: manchester
";
    let err = parse_locations(yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate geo_code")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn rejects_empty_weather_query() {
    let yaml = r"
locations:
  - name: Spain
    geo_code: ES
    weather_query: '  '
";
    let err = parse_locations(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn rejects_malformed_yaml() {
    let err = parse_locations("locations: [name: ").unwrap_err();
    assert!(matches!(err, ConfigError::LocationsFileParse(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_locations(Path::new("/nonexistent/locations.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::LocationsFileIo { .. }));
}

#[test]
fn shipped_locations_file_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/locations.yaml");
    let file = load_locations(&path).unwrap();
    assert!(file.find("GB").is_some());
}
