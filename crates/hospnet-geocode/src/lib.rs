pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
