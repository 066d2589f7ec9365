pub mod client;
pub mod error;
pub mod parse;

pub use client::PortalClient;
pub use error::PortalError;
