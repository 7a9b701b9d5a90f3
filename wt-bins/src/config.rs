//! Configuration for wt-bins
//!
//! | Setting   | CLI          | Environment         | TOML key        | Default   |
//! |-----------|--------------|---------------------|-----------------|-----------|
//! | Port      | `--port`     | `PORT`              | `port`          | 10000     |
//! | Database  | `--database` | `WT_BINS_DATABASE`  | `database_path` | `bins.db` |

use serde::Deserialize;
use std::path::PathBuf;
use wt_common::config::{resolve_setting, LoggingConfig};

pub const PORT_ENV: &str = "PORT";
pub const DATABASE_ENV: &str = "WT_BINS_DATABASE";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_DATABASE: &str = "bins.db";

/// Optional TOML file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinsToml {
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct BinsConfig {
    pub port: u16,
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
}

impl BinsConfig {
    /// Resolve CLI values over environment over TOML over defaults
    pub fn resolve(
        cli_port: Option<u16>,
        cli_database: Option<PathBuf>,
        file: BinsToml,
    ) -> wt_common::Result<Self> {
        Ok(Self {
            port: resolve_setting(cli_port, PORT_ENV, file.port, DEFAULT_PORT)?,
            database_path: resolve_setting(
                cli_database,
                DATABASE_ENV,
                file.database_path,
                PathBuf::from(DEFAULT_DATABASE),
            )?,
            logging: file.logging,
        })
    }
}
