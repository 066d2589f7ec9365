pub mod app_config;
pub mod config;
pub mod distance;
pub mod enrich;
pub mod rank;
pub mod types;

pub use app_config::{AppConfig, PortalConfig};
pub use config::{
    load_app_config, load_app_config_from_env, load_portal_config, load_portal_config_from_env,
};
pub use distance::haversine_km;
pub use enrich::{enrich, full_address};
pub use rank::{Aggregator, RankedReport};
pub use types::{Coordinate, EnrichedHospitalRecord, RawHospitalRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
