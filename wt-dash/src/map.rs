//! Bin map view model
//!
//! Turns the bin list into what the browser's map layer draws: one coloured
//! marker per bin and a viewport centred on the mean position.

use serde::Serialize;
use wt_common::BinRecord;

pub const FULL_COLOR: [u8; 3] = [255, 0, 0];
pub const NOT_FULL_COLOR: [u8; 3] = [0, 200, 0];
pub const DEFAULT_ZOOM: u8 = 14;
pub const NO_DATA_MESSAGE: &str = "No bin data available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinMarker {
    pub bin_id: String,
    pub lat: f64,
    pub lon: f64,
    /// RGB fill colour
    pub color: [u8; 3],
    pub tooltip: String,
}

impl BinMarker {
    pub fn from_record(record: &BinRecord) -> Self {
        let color = if record.status.is_full() {
            FULL_COLOR
        } else {
            NOT_FULL_COLOR
        };

        Self {
            bin_id: record.bin_id.clone(),
            lat: record.lat,
            lon: record.lon,
            color,
            tooltip: format!(
                "Bin {} ({})\nStatus: {}\nLast: {}",
                record.bin_id,
                record.bin_type,
                record.status,
                record.last_update.to_rfc3339()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<MapCenter>,
    pub zoom: u8,
    pub markers: Vec<BinMarker>,
    /// Shown instead of the map when there is nothing to draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MapView {
    pub fn from_bins(bins: &[BinRecord]) -> Self {
        if bins.is_empty() {
            return Self {
                center: None,
                zoom: DEFAULT_ZOOM,
                markers: Vec::new(),
                message: Some(NO_DATA_MESSAGE.to_string()),
            };
        }

        let count = bins.len() as f64;
        let center = MapCenter {
            lat: bins.iter().map(|b| b.lat).sum::<f64>() / count,
            lon: bins.iter().map(|b| b.lon).sum::<f64>() / count,
        };

        Self {
            center: Some(center),
            zoom: DEFAULT_ZOOM,
            markers: bins.iter().map(BinMarker::from_record).collect(),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wt_common::BinStatus;

    fn bin(id: &str, lat: f64, lon: f64, status: &str) -> BinRecord {
        BinRecord {
            bin_id: id.to_string(),
            lat,
            lon,
            bin_type: "Wet".to_string(),
            status: BinStatus::from(status),
            last_update: Utc.with_ymd_and_hms(2025, 9, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_has_message_only() {
        let view = MapView::from_bins(&[]);
        assert!(view.center.is_none());
        assert!(view.markers.is_empty());
        assert_eq!(view.message.as_deref(), Some("No bin data available."));
    }

    #[test]
    fn test_center_is_mean_position() {
        let view = MapView::from_bins(&[
            bin("B1", 12.0, 77.0, "FULL"),
            bin("B2", 13.0, 78.0, "EMPTY"),
        ]);

        let center = view.center.unwrap();
        assert!((center.lat - 12.5).abs() < 1e-9);
        assert!((center.lon - 77.5).abs() < 1e-9);
        assert_eq!(view.zoom, 14);
        assert!(view.message.is_none());
    }

    #[test]
    fn test_marker_colors() {
        let view = MapView::from_bins(&[
            bin("B1", 12.0, 77.0, "FULL"),
            bin("B2", 12.0, 77.0, "EMPTY"),
            bin("B3", 12.0, 77.0, "HALF"),
        ]);

        let colors: Vec<[u8; 3]> = view.markers.iter().map(|m| m.color).collect();
        assert_eq!(colors, [[255, 0, 0], [0, 200, 0], [0, 200, 0]]);
    }

    #[test]
    fn test_tooltip_text() {
        let marker = BinMarker::from_record(&bin("B1", 12.9, 77.6, "FULL"));
        assert_eq!(
            marker.tooltip,
            "Bin B1 (Wet)\nStatus: FULL\nLast: 2025-09-15T10:00:00+00:00"
        );
    }

    #[test]
    fn test_message_omitted_from_json_when_bins_present() {
        let view = MapView::from_bins(&[bin("B1", 12.9, 77.6, "FULL")]);
        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("message").is_none());
        assert_eq!(value["markers"][0]["color"], serde_json::json!([255, 0, 0]));
    }
}
