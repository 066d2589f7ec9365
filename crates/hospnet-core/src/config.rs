use std::path::PathBuf;

use crate::app_config::{AppConfig, PortalConfig};
use crate::ConfigError;

/// Default base URL of the network-hospital listing portal.
pub const DEFAULT_PORTAL_BASE_URL: &str = "https://www.fhpl.net/WhatsappNetworkhospitals/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load portal-only configuration from environment variables.
///
/// Every portal setting has a default, so this only fails when a set
/// variable holds an unparsable value. Commands that never geocode use this
/// instead of [`load_app_config`] so they do not demand geocoding
/// credentials or a reference location.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_portal_config() -> Result<PortalConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_portal_config_from_env()
}

/// Load portal-only configuration without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_portal_config_from_env() -> Result<PortalConfig, ConfigError> {
    build_portal_config(|key| std::env::var(key))
}

/// Build portal-only configuration using the provided env-var lookup function.
fn build_portal_config<F>(lookup: F) -> Result<PortalConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let base_url = or_default("HOSPNET_PORTAL_BASE_URL", DEFAULT_PORTAL_BASE_URL);
    let raw_timeout = or_default("HOSPNET_REQUEST_TIMEOUT_SECS", "30");
    let request_timeout_secs =
        raw_timeout
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "HOSPNET_REQUEST_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            })?;
    let user_agent = or_default(
        "HOSPNET_USER_AGENT",
        "hospnet/0.1 (hospital-distance-ranking)",
    );
    let log_level = or_default("HOSPNET_LOG_LEVEL", "info");

    Ok(PortalConfig {
        base_url,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let reference_location = require("HOSPNET_REFERENCE_LOCATION")?;
    let geocode_api_key = require("GEOCODE_API_KEY")?;

    let state = or_default("HOSPNET_STATE", "Telangana");
    let city = or_default("HOSPNET_CITY", "Hyderabad");
    let preview_count = parse_usize("HOSPNET_PREVIEW_COUNT", "530")?;
    let output_dir = PathBuf::from(or_default("HOSPNET_OUTPUT_DIR", "."));

    // Portal settings and their defaults live in one place.
    let portal = build_portal_config(&lookup)?;

    let max_retries = parse_u32("HOSPNET_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("HOSPNET_RETRY_BACKOFF_BASE_MS", "1000")?;
    let geocode_delay_ms = parse_u64("HOSPNET_GEOCODE_DELAY_MS", "100")?;

    Ok(AppConfig {
        reference_location,
        geocode_api_key,
        state,
        city,
        preview_count,
        output_dir,
        portal_base_url: portal.base_url,
        request_timeout_secs: portal.request_timeout_secs,
        user_agent: portal.user_agent,
        max_retries,
        retry_backoff_base_ms,
        geocode_delay_ms,
        log_level: portal.log_level,
    })
}

#[cfg(test)]
mod tests {
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
        m.insert("HOSPNET_REFERENCE_LOCATION", "8FV5+HPG Hyderabad, Telangana");
        m.insert("GEOCODE_API_KEY", "test-key");
        m
    }

    #[test]
    fn fails_without_reference_location() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "HOSPNET_REFERENCE_LOCATION"),
            "expected MissingEnvVar(HOSPNET_REFERENCE_LOCATION), got: {result:?}"
        );
    }

    #[test]
    fn fails_without_geocode_api_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("HOSPNET_REFERENCE_LOCATION", "8FV5+HPG Hyderabad, Telangana");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEOCODE_API_KEY"),
            "expected MissingEnvVar(GEOCODE_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.reference_location, "8FV5+HPG Hyderabad, Telangana");
        assert_eq!(cfg.state, "Telangana");
        assert_eq!(cfg.city, "Hyderabad");
        assert_eq!(cfg.preview_count, 530);
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert_eq!(cfg.portal_base_url, DEFAULT_PORTAL_BASE_URL);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "hospnet/0.1 (hospital-distance-ranking)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 1000);
        assert_eq!(cfg.geocode_delay_ms, 100);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn region_filter_override() {
        let mut map = full_env();
        map.insert("HOSPNET_STATE", "Karnataka");
        map.insert("HOSPNET_CITY", "Bengaluru");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.state, "Karnataka");
        assert_eq!(cfg.city, "Bengaluru");
    }

    #[test]
    fn preview_count_override() {
        let mut map = full_env();
        map.insert("HOSPNET_PREVIEW_COUNT", "25");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.preview_count, 25);
    }

    #[test]
    fn preview_count_invalid() {
        let mut map = full_env();
        map.insert("HOSPNET_PREVIEW_COUNT", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOSPNET_PREVIEW_COUNT"),
            "expected InvalidEnvVar(HOSPNET_PREVIEW_COUNT), got: {result:?}"
        );
    }

    #[test]
    fn request_timeout_override() {
        let mut map = full_env();
        map.insert("HOSPNET_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn request_timeout_invalid() {
        let mut map = full_env();
        map.insert("HOSPNET_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOSPNET_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(HOSPNET_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn max_retries_override() {
        let mut map = full_env();
        map.insert("HOSPNET_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn max_retries_invalid() {
        let mut map = full_env();
        map.insert("HOSPNET_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOSPNET_MAX_RETRIES"),
            "expected InvalidEnvVar(HOSPNET_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn geocode_delay_override() {
        let mut map = full_env();
        map.insert("HOSPNET_GEOCODE_DELAY_MS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.geocode_delay_ms, 0);
    }

    #[test]
    fn portal_base_url_override() {
        let mut map = full_env();
        map.insert("HOSPNET_PORTAL_BASE_URL", "http://localhost:9999/");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.portal_base_url, "http://localhost:9999/");
    }

    #[test]
    fn portal_config_loads_from_an_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_portal_config(lookup_from_map(&map))
            .expect("portal config has no required vars");
        assert_eq!(cfg.base_url, DEFAULT_PORTAL_BASE_URL);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "hospnet/0.1 (hospital-distance-ranking)");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn portal_config_overrides() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("HOSPNET_PORTAL_BASE_URL", "http://localhost:9999/");
        map.insert("HOSPNET_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_portal_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9999/");
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn portal_config_rejects_invalid_timeout() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("HOSPNET_REQUEST_TIMEOUT_SECS", "forever");
        let result = build_portal_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOSPNET_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(HOSPNET_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
