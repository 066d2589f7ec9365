//! Geocoding API response types.
//!
//! Models the JSON envelope returned by the geocoding backend: a top-level
//! `status` string (`"OK"`, `"ZERO_RESULTS"`, or an error code) plus a
//! `results` array of candidate matches. Only the geometry is consumed;
//! everything else the backend returns (formatted address, place IDs,
//! address components) is ignored during deserialization.

use serde::Deserialize;

/// Top-level envelope for a geocoding response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Present alongside error statuses such as `REQUEST_DENIED`.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One candidate match for the queried address.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// Raw latitude/longitude as sent on the wire, before range validation.
#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
