//! Per-session dashboard state
//!
//! Holds the running tally of scans, the duplicate-upload guard and the
//! optional points counter. One `DashboardSession` lives for as long as the
//! dashboard process (or until [`DashboardSession::reset`]).
//!
//! Recording a scan is split into [`plan_scan`](DashboardSession::plan_scan)
//! and [`commit`](DashboardSession::commit) so the CSV row can be written in
//! between: a failed log write leaves the session untouched.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::Serialize;
use wt_common::time::day_abbrev;

use crate::classifier::{Prediction, WasteLabel};
use crate::waste_log::WasteLogEntry;

/// Average mass of one wet waste item
pub const WET_ITEM_KG: f64 = 0.15;
/// Average mass of one dry waste item
pub const DRY_ITEM_KG: f64 = 0.05;
/// Mass logged when the label is neither category
pub const UNRECOGNIZED_ITEM_KG: f64 = 0.1;

/// Estimated mass of one scanned item
pub fn estimate_mass(label: &WasteLabel) -> f64 {
    match label {
        WasteLabel::Wet => WET_ITEM_KG,
        WasteLabel::Dry => DRY_ITEM_KG,
        WasteLabel::Unrecognized(_) => UNRECOGNIZED_ITEM_KG,
    }
}

/// One scan's contribution to the tallies
#[derive(Debug, Clone, PartialEq)]
struct ScanRow {
    weekday: Weekday,
    wet_kg: f64,
    dry_kg: f64,
}

impl ScanRow {
    fn total_kg(&self) -> f64 {
        self.wet_kg + self.dry_kg
    }
}

/// A scan ready to be committed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRecord {
    pub filename: String,
    pub prediction: Prediction,
    pub mass_kg: f64,
    pub entry: WasteLogEntry,
    #[serde(skip)]
    weekday: Weekday,
}

/// Result of offering a scan to the session
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Recorded(ScanRecord),
    /// Same filename as the last processed upload; nothing recorded
    Duplicate { filename: String },
}

/// Wet and dry mass for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTally {
    pub day: String,
    pub wet_kg: f64,
    pub dry_kg: f64,
    pub total_kg: f64,
}

/// Statistics shown next to the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub scans: usize,
    pub total_wet_kg: f64,
    pub total_dry_kg: f64,
    /// Wet/dry ratio to two decimals; `None` while no dry waste is logged
    pub wet_dry_ratio: Option<f64>,
    /// Day of the heaviest single scan; `None` before the first scan
    pub busiest_day: Option<String>,
    /// Days that have scans, Monday first
    pub daily: Vec<DayTally>,
    /// `None` when points are disabled
    pub points: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    rows: Vec<ScanRow>,
    last_uploaded_filename: Option<String>,
    points: u64,
    points_per_scan: Option<u64>,
}

impl DashboardSession {
    /// Fresh session; `points_per_scan = None` disables the points counter
    pub fn new(points_per_scan: Option<u64>) -> Self {
        Self {
            points_per_scan,
            ..Self::default()
        }
    }

    /// Drop all scans, points and the duplicate guard
    pub fn reset(&mut self) {
        *self = Self::new(self.points_per_scan);
    }

    /// Was this file the last one processed?
    ///
    /// Compares names only; re-uploading the same photo under a new name is
    /// counted again, and a name seen before the last upload is accepted.
    pub fn is_duplicate(&self, filename: &str) -> bool {
        self.last_uploaded_filename.as_deref() == Some(filename)
    }

    /// Work out what a scan would record, without changing the session
    pub fn plan_scan(
        &self,
        filename: &str,
        prediction: &Prediction,
        at: NaiveDateTime,
    ) -> ScanOutcome {
        if self.is_duplicate(filename) {
            return ScanOutcome::Duplicate {
                filename: filename.to_string(),
            };
        }

        let mass_kg = estimate_mass(&prediction.label);
        ScanOutcome::Recorded(ScanRecord {
            filename: filename.to_string(),
            prediction: prediction.clone(),
            mass_kg,
            entry: WasteLogEntry::for_scan(filename, &prediction.label, mass_kg, at),
            weekday: at.weekday(),
        })
    }

    /// Apply a planned scan
    pub fn commit(&mut self, record: &ScanRecord) {
        let (wet_kg, dry_kg) = match record.prediction.label {
            WasteLabel::Wet => (record.mass_kg, 0.0),
            WasteLabel::Dry => (0.0, record.mass_kg),
            WasteLabel::Unrecognized(_) => (0.0, 0.0),
        };

        self.rows.push(ScanRow {
            weekday: record.weekday,
            wet_kg,
            dry_kg,
        });
        if let Some(award) = self.points_per_scan {
            self.points += award;
        }
        self.last_uploaded_filename = Some(record.filename.clone());
    }

    /// Plan and commit in one step
    pub fn record_scan(
        &mut self,
        filename: &str,
        prediction: &Prediction,
        at: NaiveDateTime,
    ) -> ScanOutcome {
        let outcome = self.plan_scan(filename, prediction, at);
        if let ScanOutcome::Recorded(record) = &outcome {
            self.commit(record);
        }
        outcome
    }

    pub fn summary(&self) -> Summary {
        let total_wet_kg: f64 = self.rows.iter().map(|r| r.wet_kg).sum();
        let total_dry_kg: f64 = self.rows.iter().map(|r| r.dry_kg).sum();

        let wet_dry_ratio = (total_dry_kg > 0.0)
            .then(|| (total_wet_kg / total_dry_kg * 100.0).round() / 100.0);

        // Day of the single heaviest scan; the earliest scan wins a tie
        let busiest_day = self
            .rows
            .iter()
            .fold(None::<&ScanRow>, |best, row| match best {
                Some(top) if top.total_kg() >= row.total_kg() => best,
                _ => Some(row),
            })
            .map(|row| day_abbrev(row.weekday).to_string());

        Summary {
            scans: self.rows.len(),
            total_wet_kg,
            total_dry_kg,
            wet_dry_ratio,
            busiest_day,
            daily: self.daily_tallies(),
            points: self.points_per_scan.map(|_| self.points),
        }
    }

    fn daily_tallies(&self) -> Vec<DayTally> {
        let mut totals = [(0.0_f64, 0.0_f64, false); 7];
        for row in &self.rows {
            let slot = &mut totals[row.weekday.num_days_from_monday() as usize];
            slot.0 += row.wet_kg;
            slot.1 += row.dry_kg;
            slot.2 = true;
        }

        let mut weekday = Weekday::Mon;
        let mut daily = Vec::new();
        for (wet_kg, dry_kg, seen) in totals {
            if seen {
                daily.push(DayTally {
                    day: day_abbrev(weekday).to_string(),
                    wet_kg,
                    dry_kg,
                    total_kg: wet_kg + dry_kg,
                });
            }
            weekday = weekday.succ();
        }
        daily
    }
}
