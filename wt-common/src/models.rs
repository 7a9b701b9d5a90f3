//! Smart-bin data model
//!
//! A bin is identified by its `bin_id` alone. Each observation replaces the
//! previous state of that bin; the store stamps `last_update` on write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observed fill state of a bin
///
/// Bins report `"FULL"` or `"EMPTY"`. Any other text is kept verbatim in
/// [`BinStatus::Other`] so it survives a write/read round trip, and is
/// treated as "not full" for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinStatus {
    Full,
    Empty,
    Other(String),
}

impl BinStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BinStatus::Full => "FULL",
            BinStatus::Empty => "EMPTY",
            BinStatus::Other(raw) => raw,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, BinStatus::Full)
    }
}

impl From<String> for BinStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "FULL" => BinStatus::Full,
            "EMPTY" => BinStatus::Empty,
            _ => BinStatus::Other(raw),
        }
    }
}

impl From<&str> for BinStatus {
    fn from(raw: &str) -> Self {
        BinStatus::from(raw.to_string())
    }
}

impl From<BinStatus> for String {
    fn from(status: BinStatus) -> Self {
        match status {
            BinStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status report from a physical bin (the `POST /garbage_alert` body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinObservation {
    pub bin_id: String,
    pub lat: f64,
    pub lon: f64,
    /// Waste category the bin is assigned to, e.g. "Wet" or "Dry"
    #[serde(rename = "type")]
    pub bin_type: String,
    pub status: BinStatus,
}

/// Last known state of one bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRecord {
    pub bin_id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub bin_type: String,
    pub status: BinStatus,
    #[serde(deserialize_with = "crate::time::deserialize_timestamp")]
    pub last_update: DateTime<Utc>,
}

impl BinRecord {
    /// Build the record an observation produces when written at `at`
    pub fn from_observation(observation: BinObservation, at: DateTime<Utc>) -> Self {
        Self {
            bin_id: observation.bin_id,
            lat: observation.lat,
            lon: observation.lon,
            bin_type: observation.bin_type,
            status: observation.status,
            last_update: at,
        }
    }
}
