//! # Waste Tracker Common Library
//!
//! Shared code for the waste tracker services:
//! - Bin records and observations (the smart-bin data model)
//! - Configuration loading (CLI > environment > TOML > defaults)
//! - Database initialization and the bin store
//! - Error and timestamp helpers

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{BinObservation, BinRecord, BinStatus};
