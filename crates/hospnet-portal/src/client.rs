//! HTTP client for the network-hospital listing portal.
//!
//! The portal is a plain web form: a GET serves the search page with the
//! insurer dropdown, and a POST of the form fields returns the same page
//! with the provider grid filled in. Per-insurer failures are surfaced as
//! errors for the caller to log and skip; they never abort a run here.

use std::time::Duration;

use hospnet_core::RawHospitalRecord;
use reqwest::{Client, Url};

use crate::error::PortalError;
use crate::parse::{extract_insurer_options, extract_provider_rows};

const FIELD_INSURER: &str = "ctl00$ContentPlaceHolder1$ddinsurance";
const FIELD_STATE: &str = "ctl00$ContentPlaceHolder1$ddlState";
const FIELD_CITY: &str = "ctl00$ContentPlaceHolder1$ddlCity";
const FIELD_SEARCH: &str = "ctl00$ContentPlaceHolder1$btnGo";

/// Client for the listing portal's search form.
pub struct PortalClient {
    client: Client,
    base_url: Url,
}

impl PortalClient {
    /// Creates a client for the portal at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PortalError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PortalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| PortalError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the search page and returns all insurer names from the
    /// insurer dropdown, placeholder excluded.
    ///
    /// # Errors
    ///
    /// - [`PortalError::Http`] on network failure.
    /// - [`PortalError::UnexpectedStatus`] on a non-2xx response.
    /// - [`PortalError::MissingElement`] when the dropdown is absent.
    pub async fn list_insurers(&self) -> Result<Vec<String>, PortalError> {
        let html = self.fetch_page(self.client.get(self.base_url.clone())).await?;
        extract_insurer_options(&html).ok_or_else(|| PortalError::MissingElement {
            element: "insurer dropdown".to_owned(),
        })
    }

    /// Runs a provider search for one insurer under the fixed region filter
    /// and returns the grid rows. Zero rows is a valid result.
    ///
    /// # Errors
    ///
    /// - [`PortalError::Http`] on network failure.
    /// - [`PortalError::UnexpectedStatus`] on a non-2xx response.
    pub async fn fetch_hospitals(
        &self,
        insurer: &str,
        state: &str,
        city: &str,
    ) -> Result<Vec<RawHospitalRecord>, PortalError> {
        let form = [
            (FIELD_INSURER, insurer),
            (FIELD_STATE, state),
            (FIELD_CITY, city),
            (FIELD_SEARCH, "GO"),
        ];
        let request = self.client.post(self.base_url.clone()).form(&form);
        let html = self.fetch_page(request).await?;

        let rows = extract_provider_rows(&html, insurer);
        if rows.is_empty() {
            tracing::debug!(insurer, state, city, "search returned no provider rows");
        }
        Ok(rows)
    }

    /// Sends the request, asserts a 2xx status, and returns the body text.
    async fn fetch_page(&self, request: reqwest::RequestBuilder) -> Result<String, PortalError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
