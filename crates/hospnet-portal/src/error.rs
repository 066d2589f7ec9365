use thiserror::Error;

/// Errors that can occur while querying the network-hospital listing portal.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid portal base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The search page did not contain an expected element, e.g. the
    /// insurer dropdown. Usually means the portal markup changed.
    #[error("portal page is missing expected element: {element}")]
    MissingElement { element: String },
}
