use thiserror::Error;

/// Errors returned by the geocoding API client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-OK status in the response envelope
    /// (e.g. `REQUEST_DENIED`, `INVALID_REQUEST`).
    #[error("geocoding API error: {0}")]
    Api(String),

    /// The backend returned `OVER_QUERY_LIMIT`: the short-term request rate
    /// was exceeded. Retried with back-off before surfacing.
    #[error("geocoding quota exceeded: {0}")]
    OverQueryLimit(String),

    /// The configured base URL does not parse.
    #[error("invalid geocoding base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
