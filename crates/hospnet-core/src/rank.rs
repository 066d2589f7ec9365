//! Append-only aggregation and distance ranking of enriched records.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::EnrichedHospitalRecord;

/// Accumulates enriched records across all insurer queries.
///
/// Insertion order is preserved until [`Aggregator::rank`] sorts. Records are
/// never deduplicated: the same hospital listed under several insurers
/// produces one record per insurer.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<EnrichedHospitalRecord>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: EnrichedHospitalRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorts ascending by distance and stamps the report with the current
    /// time (used for the export filename).
    #[must_use]
    pub fn rank(self) -> RankedReport {
        self.rank_at(Utc::now())
    }

    /// Like [`Aggregator::rank`] but with a caller-supplied timestamp, so
    /// ranking stays deterministic in tests.
    ///
    /// The sort is stable: unknown distances order after every known value,
    /// and ties keep their original insertion order.
    #[must_use]
    pub fn rank_at(mut self, generated_at: DateTime<Utc>) -> RankedReport {
        self.records.sort_by(|a, b| {
            let da = a.distance_km.unwrap_or(f64::INFINITY);
            let db = b.distance_km.unwrap_or(f64::INFINITY);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
        RankedReport {
            records: self.records,
            generated_at,
        }
    }
}

/// The final ordered output of a run: records ascending by distance with
/// unknown-distance records last, plus the generation timestamp.
#[derive(Debug)]
pub struct RankedReport {
    pub records: Vec<EnrichedHospitalRecord>,
    pub generated_at: DateTime<Utc>,
}
