//! Append-only CSV audit trail of scans
//!
//! Columns: `timestamp,date,day,label,mass_kg`. The header is written once,
//! when the file is first created (or found empty). The dashboard never
//! reads this file back.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use wt_common::time::day_abbrev;

use crate::classifier::WasteLabel;

#[derive(Debug, Error)]
pub enum WasteLogError {
    #[error("Failed to open waste log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write waste log: {0}")]
    Write(#[from] csv::Error),

    #[error("Failed to flush waste log: {0}")]
    Flush(#[from] std::io::Error),
}

/// One CSV row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteLogEntry {
    /// Local wall-clock time, ISO 8601 with microseconds
    pub timestamp: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Three-letter day name
    pub day: String,
    /// `"<filename>: <label>"`
    pub label: String,
    pub mass_kg: f64,
}

impl WasteLogEntry {
    pub fn for_scan(filename: &str, label: &WasteLabel, mass_kg: f64, at: NaiveDateTime) -> Self {
        Self {
            timestamp: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            date: at.format("%Y-%m-%d").to_string(),
            day: day_abbrev(at.weekday()).to_string(),
            label: format!("{}: {}", filename, label),
            mass_kg,
        }
    }
}

/// CSV file the dashboard appends to
pub struct WasteLog {
    path: PathBuf,
}

impl WasteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the file is new
    pub fn append(&self, entry: &WasteLogEntry) -> Result<(), WasteLogError> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| WasteLogError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;

        debug!(path = %self.path.display(), label = %entry.label, "Appended waste log entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_micro_opt(hour, 15, 30, 250)
            .unwrap()
    }

    #[test]
    fn test_entry_fields() {
        let entry = WasteLogEntry::for_scan("peel.jpg", &WasteLabel::Wet, 0.15, at(15, 9));

        assert_eq!(entry.timestamp, "2025-09-15T09:15:30.000250");
        assert_eq!(entry.date, "2025-09-15");
        assert_eq!(entry.day, "Mon");
        assert_eq!(entry.label, "peel.jpg: Wet");
        assert_eq!(entry.mass_kg, 0.15);
    }

    #[test]
    fn test_entry_keeps_unrecognized_label_text() {
        let label = WasteLabel::Unrecognized("2 Glass".to_string());
        let entry = WasteLogEntry::for_scan("jar.png", &label, 0.1, at(16, 9));
        assert_eq!(entry.label, "jar.png: 2 Glass");
        assert_eq!(entry.day, "Tue");
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = WasteLog::new(dir.path().join("waste_log.csv"));

        log.append(&WasteLogEntry::for_scan("a.jpg", &WasteLabel::Wet, 0.15, at(15, 9)))
            .unwrap();
        log.append(&WasteLogEntry::for_scan("b.jpg", &WasteLabel::Dry, 0.05, at(15, 10)))
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,date,day,label,mass_kg");
        assert_eq!(
            lines[1],
            "2025-09-15T09:15:30.000250,2025-09-15,Mon,a.jpg: Wet,0.15"
        );
        assert_eq!(
            lines[2],
            "2025-09-15T10:15:30.000250,2025-09-15,Mon,b.jpg: Dry,0.05"
        );
    }

    #[test]
    fn test_existing_file_gets_no_second_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waste_log.csv");
        std::fs::write(
            &path,
            "timestamp,date,day,label,mass_kg\n2025-09-14T08:00:00.000000,2025-09-14,Sun,x.jpg: Dry,0.05\n",
        )
        .unwrap();

        let log = WasteLog::new(&path);
        log.append(&WasteLogEntry::for_scan("y.jpg", &WasteLabel::Wet, 0.15, at(15, 9)))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("timestamp,date,day").count(), 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waste_log.csv");
        std::fs::write(&path, "").unwrap();

        WasteLog::new(&path)
            .append(&WasteLogEntry::for_scan("a.jpg", &WasteLabel::Wet, 0.15, at(15, 9)))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("timestamp,date,day,label,mass_kg\n"));
    }

    #[test]
    fn test_missing_directory_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = WasteLog::new(dir.path().join("no-such-dir").join("waste_log.csv"));

        let result = log.append(&WasteLogEntry::for_scan("a.jpg", &WasteLabel::Wet, 0.15, at(15, 9)));
        assert!(matches!(result, Err(WasteLogError::Open { .. })));
    }
}
