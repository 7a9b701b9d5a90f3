//! Configuration for wt-dash
//!
//! | Setting   | CLI          | Environment     | TOML key     | Default                        |
//! |-----------|--------------|-----------------|--------------|--------------------------------|
//! | Port      | `--port`     | `WT_DASH_PORT`  | `port`       | 8501                           |
//! | Bins URL  | `--bins-url` | `WT_BINS_URL`   | `bins_url`   | `http://localhost:10000/bins`  |
//! | Model     | `--model`    | `WT_DASH_MODEL` | `model_path` | `model/model.onnx`             |
//! | Labels    | `--labels`   | `WT_DASH_LABELS`| `labels_path`| `model/labels.txt`             |
//! | CSV log   | `--log-path` | `WT_DASH_LOG`   | `log_path`   | `waste_log.csv`                |
//!
//! TOML-only keys: `points_per_scan` (unset disables points),
//! `fetch_attempts`, `fetch_delay_ms`, `input_size`, `input_layout`.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use wt_common::config::{resolve_setting, LoggingConfig};

use crate::bin_client::RetryPolicy;
use crate::classifier::onnx::ModelInput;
use crate::classifier::InputLayout;

pub const PORT_ENV: &str = "WT_DASH_PORT";
pub const BINS_URL_ENV: &str = "WT_BINS_URL";
pub const MODEL_ENV: &str = "WT_DASH_MODEL";
pub const LABELS_ENV: &str = "WT_DASH_LABELS";
pub const LOG_PATH_ENV: &str = "WT_DASH_LOG";

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_BINS_URL: &str = "http://localhost:10000/bins";
pub const DEFAULT_MODEL: &str = "model/model.onnx";
pub const DEFAULT_LABELS: &str = "model/labels.txt";
pub const DEFAULT_LOG_PATH: &str = "waste_log.csv";

/// Optional TOML file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashToml {
    pub port: Option<u16>,
    pub bins_url: Option<String>,
    pub model_path: Option<PathBuf>,
    pub labels_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub points_per_scan: Option<u64>,
    pub fetch_attempts: Option<u32>,
    pub fetch_delay_ms: Option<u64>,
    pub input_size: Option<u32>,
    pub input_layout: Option<InputLayout>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct DashOverrides {
    pub port: Option<u16>,
    pub bins_url: Option<String>,
    pub model_path: Option<PathBuf>,
    pub labels_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub port: u16,
    pub bins_url: String,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub log_path: PathBuf,
    pub points_per_scan: Option<u64>,
    pub retry: RetryPolicy,
    pub model_input: ModelInput,
    pub logging: LoggingConfig,
}

impl DashConfig {
    pub fn resolve(cli: DashOverrides, file: DashToml) -> wt_common::Result<Self> {
        let retry_default = RetryPolicy::default();
        let input_default = ModelInput::default();

        Ok(Self {
            port: resolve_setting(cli.port, PORT_ENV, file.port, DEFAULT_PORT)?,
            bins_url: resolve_setting(
                cli.bins_url,
                BINS_URL_ENV,
                file.bins_url,
                DEFAULT_BINS_URL.to_string(),
            )?,
            model_path: resolve_setting(
                cli.model_path,
                MODEL_ENV,
                file.model_path,
                PathBuf::from(DEFAULT_MODEL),
            )?,
            labels_path: resolve_setting(
                cli.labels_path,
                LABELS_ENV,
                file.labels_path,
                PathBuf::from(DEFAULT_LABELS),
            )?,
            log_path: resolve_setting(
                cli.log_path,
                LOG_PATH_ENV,
                file.log_path,
                PathBuf::from(DEFAULT_LOG_PATH),
            )?,
            points_per_scan: file.points_per_scan,
            retry: RetryPolicy {
                max_attempts: file.fetch_attempts.unwrap_or(retry_default.max_attempts),
                delay: file
                    .fetch_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(retry_default.delay),
            },
            model_input: ModelInput {
                size: file.input_size.unwrap_or(input_default.size),
                layout: file.input_layout.unwrap_or(input_default.layout),
            },
            logging: file.logging,
        })
    }
}
