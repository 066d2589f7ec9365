use std::path::PathBuf;

/// Run-level configuration, loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Free-text reference location, geocoded once per run.
    pub reference_location: String,
    /// Credential for the geocoding backend.
    pub geocode_api_key: String,
    /// Region filter passed to the listing portal.
    pub state: String,
    pub city: String,
    /// How many nearest hospitals to print after the export.
    pub preview_count: usize,
    /// Directory the timestamped CSV report is written to.
    pub output_dir: PathBuf,
    pub portal_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Politeness delay between consecutive geocoding calls.
    pub geocode_delay_ms: u64,
    pub log_level: String,
}

impl AppConfig {
    /// The subset of configuration the listing portal needs. Lets
    /// portal-only commands run without the geocoding credentials.
    #[must_use]
    pub fn portal(&self) -> PortalConfig {
        PortalConfig {
            base_url: self.portal_base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            user_agent: self.user_agent.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Configuration for talking to the listing portal alone.
///
/// Every field has a default, so loading this never fails on a missing
/// environment variable.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("reference_location", &self.reference_location)
            .field("geocode_api_key", &"[redacted]")
            .field("state", &self.state)
            .field("city", &self.city)
            .field("preview_count", &self.preview_count)
            .field("output_dir", &self.output_dir)
            .field("portal_base_url", &self.portal_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("geocode_delay_ms", &self.geocode_delay_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_api_key() {
        let config = AppConfig {
            reference_location: "8FV5+HPG Hyderabad, Telangana".to_owned(),
            geocode_api_key: "super-secret".to_owned(),
            state: "Telangana".to_owned(),
            city: "Hyderabad".to_owned(),
            preview_count: 530,
            output_dir: PathBuf::from("."),
            portal_base_url: "https://portal.example".to_owned(),
            request_timeout_secs: 30,
            user_agent: "hospnet/0.1".to_owned(),
            max_retries: 3,
            retry_backoff_base_ms: 1000,
            geocode_delay_ms: 100,
            log_level: "info".to_owned(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn portal_view_carries_the_portal_fields() {
        let config = AppConfig {
            reference_location: "8FV5+HPG Hyderabad, Telangana".to_owned(),
            geocode_api_key: "super-secret".to_owned(),
            state: "Telangana".to_owned(),
            city: "Hyderabad".to_owned(),
            preview_count: 530,
            output_dir: PathBuf::from("."),
            portal_base_url: "https://portal.example".to_owned(),
            request_timeout_secs: 45,
            user_agent: "hospnet/0.1".to_owned(),
            max_retries: 3,
            retry_backoff_base_ms: 1000,
            geocode_delay_ms: 100,
            log_level: "debug".to_owned(),
        };
        let portal = config.portal();
        assert_eq!(portal.base_url, "https://portal.example");
        assert_eq!(portal.request_timeout_secs, 45);
        assert_eq!(portal.user_agent, "hospnet/0.1");
        assert_eq!(portal.log_level, "debug");
    }
}
