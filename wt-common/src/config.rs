//! Configuration loading and setting resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: services start on defaults (and
//! say so once logging is up). A config file that exists but does not parse
//! is an error.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Logging section shared by every service's TOML file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    ///
    /// Applies the configured level to the service crate and to tower-http's
    /// request tracing.
    pub fn filter_directive(&self, crate_name: &str) -> String {
        format!(
            "{}={level},wt_common={level},tower_http={level}",
            crate_name.replace('-', "_"),
            level = self.level
        )
    }
}

/// Load a TOML config file into `T`
///
/// `None` or a non-existent path yields `T::default()`.
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(T::default());
    };

    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Resolve one setting from its four possible sources
///
/// An environment variable that is set but does not parse is a
/// configuration error rather than a silent fallback.
pub fn resolve_setting<T>(
    cli_arg: Option<T>,
    env_var_name: &str,
    file_value: Option<T>,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    // Priority 1: Command-line argument
    if let Some(value) = cli_arg {
        return Ok(value);
    }

    // Priority 2: Environment variable
    if let Ok(raw) = std::env::var(env_var_name) {
        return raw.trim().parse::<T>().map_err(|e| {
            Error::Config(format!("Invalid value for {}={:?}: {}", env_var_name, raw, e))
        });
    }

    // Priority 3: TOML config file
    if let Some(value) = file_value {
        return Ok(value);
    }

    // Priority 4: Compiled default
    Ok(default)
}
