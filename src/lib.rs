//! EV price estimation service.
//!
//! Loads a fitted regression pipeline once at startup and serves a
//! single-page form that turns ten vehicle attributes into a formatted
//! price estimate with a qualitative tier.

pub mod config;
pub mod model;
pub mod pricing;
pub mod types;

pub use config::AppConfig;
pub use model::{PredictError, PricePipeline};
pub use pricing::{estimate, format_eur, PriceEstimate, Tier};
pub use types::VehicleSpec;
