//! Shell configuration
//!
//! Optional JSON file; every field falls back to its default when absent.

use crate::error::{ForecastError, Result};
use crate::shell::counter::DEFAULT_STATE_PATH;
use crate::shell::export::{DEFAULT_EXPORT_PREFIX, DEFAULT_EXPORT_SCALE};
use crate::shell::{ChartExporter, ChartPanel, CurrencyFormatter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShellConfig {
    /// JSON key-value file holding the usage counter
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Directory chart images are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,

    /// Raster scale relative to the logical panel size
    #[serde(default = "default_export_scale")]
    pub export_scale: u32,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub currency_decimals: usize,
}

fn default_state_path() -> PathBuf { PathBuf::from(DEFAULT_STATE_PATH) }
fn default_export_dir() -> PathBuf { PathBuf::from(".") }
fn default_export_prefix() -> String { DEFAULT_EXPORT_PREFIX.to_string() }
fn default_export_scale() -> u32 { DEFAULT_EXPORT_SCALE }
fn default_currency_symbol() -> String { "$".to_string() }

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            export_dir: default_export_dir(),
            export_prefix: default_export_prefix(),
            export_scale: default_export_scale(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: 0,
        }
    }
}

impl ShellConfig {
    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ForecastError::storage(path, e)),
        };
        Self::from_json(&text).map_err(|e| ForecastError::config(path, e.to_string()))
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter {
            symbol: self.currency_symbol.clone(),
            decimals: self.currency_decimals,
        }
    }

    pub fn exporter(&self) -> ChartExporter {
        ChartExporter::new(ChartPanel::default(), self.export_scale, self.export_prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ShellConfig::from_json(r#"{"export_scale": 3, "currency_symbol": "€"}"#).unwrap();
        assert_eq!(config.export_scale, 3);
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.state_path, PathBuf::from(DEFAULT_STATE_PATH));
        assert_eq!(config.export_prefix, DEFAULT_EXPORT_PREFIX);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("forecast-config-does-not-exist.json");
        assert_eq!(ShellConfig::load(&path).unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("forecast-config-bad-{}.json", std::process::id()));
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(ShellConfig::load(&path), Err(ForecastError::Config { .. })));
        let _ = fs::remove_file(&path);
    }
}
