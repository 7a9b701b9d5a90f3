//! HTTP API handlers for wt-bins

pub mod alerts;
pub mod bins;
pub mod error;
pub mod health;

pub use alerts::garbage_alert;
pub use bins::list_bins;
pub use error::ApiError;
pub use health::health_routes;
