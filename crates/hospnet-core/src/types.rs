//! Domain types for the hospital distance-ranking pipeline.

use serde::{Deserialize, Serialize};

/// A resolved latitude/longitude pair. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting out-of-range values.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`.
    /// `NaN` fails both range checks and is rejected, so values accepted
    /// here are always safe inputs for distance math.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }
}

/// One provider row as yielded by the network-hospital listing portal.
///
/// Created per scraped row and consumed immediately by enrichment; never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHospitalRecord {
    /// Insurer the row was listed under.
    pub insurer: String,
    /// Portal-assigned serial number within the result grid.
    pub serial_no: String,
    pub name: String,
    /// Free-text address as printed in the grid, without the region suffix.
    pub address: String,
    pub contact: String,
}

/// A raw record combined with its geocoding outcome.
///
/// `None` is the "unknown" sentinel for both fields: `distance_km` is `None`
/// exactly when `coordinates` is `None` or the run's reference location
/// failed to resolve. Construct through [`crate::enrich`] to preserve that
/// invariant.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedHospitalRecord {
    pub insurer: String,
    pub serial_no: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub coordinates: Option<Coordinate>,
    /// Great-circle distance from the reference location, rounded to two
    /// decimal places. `None` sorts after every known distance.
    pub distance_km: Option<f64>,
}
