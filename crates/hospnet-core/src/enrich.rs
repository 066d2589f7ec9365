//! Enrichment policy: combine a raw portal row with its geocoding outcome.

use crate::distance::haversine_km;
use crate::types::{Coordinate, EnrichedHospitalRecord, RawHospitalRecord};

/// Builds the full geocodable address by appending the run's fixed region
/// suffix to the raw grid address.
#[must_use]
pub fn full_address(address: &str, city: &str, state: &str) -> String {
    format!("{address}, {city}, {state}")
}

/// Combines a raw record with the geocoding outcomes for the hospital and
/// the run's reference location.
///
/// When both ends resolved, the distance is computed and rounded to two
/// decimal places. When either end is unresolved the record degrades to the
/// unknown sentinel: `coordinates` and `distance_km` are both `None`. This
/// is the only failure path; the function never errors.
#[must_use]
pub fn enrich(
    raw: RawHospitalRecord,
    hospital: Option<Coordinate>,
    reference: Option<Coordinate>,
) -> EnrichedHospitalRecord {
    let (coordinates, distance_km) = match (hospital, reference) {
        (Some(hosp), Some(reference)) => {
            let km = round2(haversine_km(reference, hosp));
            (Some(hosp), Some(km))
        }
        _ => (None, None),
    };

    EnrichedHospitalRecord {
        insurer: raw.insurer,
        serial_no: raw.serial_no,
        name: raw.name,
        address: raw.address,
        contact: raw.contact,
        coordinates,
        distance_km,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
