//! HTTP client for the geocoding backend.
//!
//! Wraps `reqwest` with API key management, bounded retry on transient
//! failures, and typed response deserialization. The backend wraps every
//! response in a `{"status": ..., "results": [...]}` envelope;
//! `OVER_QUERY_LIMIT` surfaces as the retriable
//! [`GeocodeError::OverQueryLimit`], and other non-OK statuses besides
//! `ZERO_RESULTS` surface as [`GeocodeError::Api`].

use std::time::Duration;

use hospnet_core::Coordinate;
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::retry::retry_with_backoff;
use crate::types::GeocodeResponse;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const GEOCODE_PATH: &str = "maps/api/geocode/json";

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";

/// Client for the geocoding REST API.
///
/// Manages the HTTP client, API key, and endpoint URL. Use
/// [`GeocodeClient::new`] for production or [`GeocodeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeocodeClient {
    /// Creates a new client pointed at the production geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the endpoint path appends rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(GEOCODE_PATH))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Resolves a free-text address to a coordinate, with explicit failure
    /// signalling.
    ///
    /// Returns `Ok(Some(_))` with the first candidate when the backend finds
    /// a match (no disambiguation among multiple candidates), `Ok(None)` on
    /// `ZERO_RESULTS` or an out-of-range candidate. Transient failures —
    /// network errors, 5xx, and `OVER_QUERY_LIMIT` rate limiting — are
    /// retried with back-off before surfacing.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Api`] if the backend returns an error status.
    /// - [`GeocodeError::OverQueryLimit`] if the rate limit persists after
    ///   all retries are exhausted.
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = self.build_url(address);
        // The envelope status is checked inside the retried operation so
        // that OVER_QUERY_LIMIT responses back off and retry too.
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.geocode_once(&url, address)
        })
        .await
    }

    /// One request/parse/status-check attempt for [`GeocodeClient::geocode`].
    async fn geocode_once(
        &self,
        url: &Url,
        address: &str,
    ) -> Result<Option<Coordinate>, GeocodeError> {
        let body = self.request_json(url).await?;

        let response: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode({address})"),
                source: e,
            })?;

        match response.status.as_str() {
            STATUS_OK => {
                let Some(first) = response.results.first() else {
                    // Status OK with an empty results array is off-contract;
                    // treat it the same as ZERO_RESULTS.
                    return Ok(None);
                };
                let location = &first.geometry.location;
                match Coordinate::new(location.lat, location.lng) {
                    Some(coordinate) => Ok(Some(coordinate)),
                    None => {
                        tracing::warn!(
                            address,
                            lat = location.lat,
                            lng = location.lng,
                            "backend returned out-of-range coordinates; treating as unresolved"
                        );
                        Ok(None)
                    }
                }
            }
            STATUS_ZERO_RESULTS => Ok(None),
            status => {
                let detail = response
                    .error_message
                    .map_or_else(|| status.to_owned(), |msg| format!("{status}: {msg}"));
                if status == STATUS_OVER_QUERY_LIMIT {
                    Err(GeocodeError::OverQueryLimit(detail))
                } else {
                    Err(GeocodeError::Api(detail))
                }
            }
        }
    }

    /// Resolves an address, swallowing every failure as "unresolved".
    ///
    /// Implements the run's degradation policy: a geocoding failure is local
    /// to one record, logged, and never fatal.
    pub async fn resolve(&self, address: &str) -> Option<Coordinate> {
        match self.geocode(address).await {
            Ok(Some(coordinate)) => Some(coordinate),
            Ok(None) => {
                tracing::warn!(address, "address did not geocode to any candidate");
                None
            }
            Err(e) => {
                tracing::warn!(
                    address,
                    error = %e,
                    "geocoding failed; treating address as unresolved"
                );
                None
            }
        }
    }

    /// Builds the request URL with properly percent-encoded query parameters.
    fn build_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("address", address);
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("{}{}", url.origin().ascii_serialization(), url.path()),
            source: e,
        })
    }
}
