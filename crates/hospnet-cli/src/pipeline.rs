//! End-to-end run orchestration: insurer list → provider rows → geocode →
//! enrich → rank → export.
//!
//! Failure containment follows the run's degradation policy: a record that
//! fails to geocode degrades to the unknown sentinel, an insurer whose fetch
//! fails is logged and skipped, and only export failures (or the portal being
//! entirely unavailable) abort the run.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use hospnet_core::{
    enrich, full_address, Aggregator, AppConfig, Coordinate, PortalConfig, RawHospitalRecord,
};
use hospnet_geocode::GeocodeClient;
use hospnet_portal::PortalClient;

use crate::report;

/// Builds the geocoding client from run configuration.
///
/// # Errors
///
/// Returns an error if the underlying HTTP client cannot be constructed.
pub fn build_geocoder(config: &AppConfig) -> anyhow::Result<GeocodeClient> {
    GeocodeClient::new(
        &config.geocode_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("constructing geocoding client")
}

/// Builds the portal client from portal-only configuration, so commands that
/// never geocode can construct it without geocoding credentials.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// constructed.
pub fn build_portal(config: &PortalConfig) -> anyhow::Result<PortalClient> {
    PortalClient::new(
        &config.base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("constructing portal client")
}

/// Runs the whole pipeline and returns the path of the exported CSV.
///
/// # Errors
///
/// Returns an error when the insurer list cannot be fetched at all or when
/// the export file cannot be written. Per-record and per-insurer failures
/// are logged and contained.
pub async fn run(
    config: &AppConfig,
    geocoder: &GeocodeClient,
    portal: &PortalClient,
) -> anyhow::Result<PathBuf> {
    // Resolved once per run; every hospital distance reuses it.
    let reference = geocoder.resolve(&config.reference_location).await;
    if reference.is_none() {
        tracing::warn!(
            location = %config.reference_location,
            "reference location did not resolve; all distances will be unknown"
        );
    }

    let insurers = portal
        .list_insurers()
        .await
        .context("fetching insurer list from portal")?;
    tracing::info!(count = insurers.len(), "found insurance companies to process");

    let mut aggregator = Aggregator::new();
    for insurer in &insurers {
        tracing::info!(insurer, "processing insurance company");
        match portal
            .fetch_hospitals(insurer, &config.state, &config.city)
            .await
        {
            Ok(rows) => {
                for raw in rows {
                    let record = enrich_row(geocoder, config, raw, reference).await;
                    tracing::info!(
                        hospital = %record.name,
                        distance_km = ?record.distance_km,
                        "processed hospital"
                    );
                    aggregator.add(record);
                    if config.geocode_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(config.geocode_delay_ms)).await;
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    insurer,
                    error = %e,
                    "provider fetch failed; skipping insurer"
                );
            }
        }
    }

    let total = aggregator.len();
    let report = aggregator.rank();
    let path = report::export_csv(&report, &config.output_dir)?;
    tracing::info!(
        path = %path.display(),
        records = total,
        "ranked report written"
    );

    report::print_nearest(&report, config.preview_count);
    Ok(path)
}

/// Enriches one raw row: geocode the full address, then combine with the
/// cached reference coordinate. Never fails; unresolved rows degrade.
async fn enrich_row(
    geocoder: &GeocodeClient,
    config: &AppConfig,
    raw: RawHospitalRecord,
    reference: Option<Coordinate>,
) -> hospnet_core::EnrichedHospitalRecord {
    let address = full_address(&raw.address, &config.city, &config.state);
    let coordinates = geocoder.resolve(&address).await;
    enrich(raw, coordinates, reference)
}
