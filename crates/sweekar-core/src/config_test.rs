use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_MAPS_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SWEEKAR_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_MAPS_API_KEY"),
        "expected MissingEnvVar(GOOGLE_MAPS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_MAPS_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_api_key, "test-key");
    assert_eq!(cfg.places_base_url, DEFAULT_PLACES_BASE_URL);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert!((cfg.search_radius_m - 10_000.0).abs() < f64::EPSILON);
    assert!((cfg.refetch_distance_m - 100.0).abs() < f64::EPSILON);
    assert_eq!(cfg.location_timeout_ms, 5_000);
    assert_eq!(cfg.max_concurrent_requests, 16);
    assert!(cfg.categories_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("SWEEKAR_ENV", "production");
    map.insert("SWEEKAR_SEARCH_RADIUS_M", "5000");
    map.insert("SWEEKAR_REFETCH_DISTANCE_M", "250.5");
    map.insert("SWEEKAR_LOCATION_TIMEOUT_MS", "1500");
    map.insert("SWEEKAR_MAX_CONCURRENT_REQUESTS", "4");
    map.insert("SWEEKAR_CATEGORIES_PATH", "./config/categories.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert!((cfg.search_radius_m - 5_000.0).abs() < f64::EPSILON);
    assert!((cfg.refetch_distance_m - 250.5).abs() < f64::EPSILON);
    assert_eq!(cfg.location_timeout_ms, 1_500);
    assert_eq!(cfg.max_concurrent_requests, 4);
    assert_eq!(
        cfg.categories_path.as_deref(),
        Some(std::path::Path::new("./config/categories.yaml"))
    );
}

#[test]
fn build_app_config_rejects_non_positive_radius() {
    let mut map = full_env();
    map.insert("SWEEKAR_SEARCH_RADIUS_M", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEEKAR_SEARCH_RADIUS_M"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("SWEEKAR_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEEKAR_REQUEST_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = full_env();
    map.insert("SWEEKAR_MAX_CONCURRENT_REQUESTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEEKAR_MAX_CONCURRENT_REQUESTS"),
        "got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = full_env();
    map.insert("GOOGLE_MAPS_API_KEY", "AIza-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("AIza-secret"));
    assert!(rendered.contains("[redacted]"));
}
