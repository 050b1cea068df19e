pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::Config;
pub use error::EcoTrackError;
pub use geo::*;
pub use types::*;
