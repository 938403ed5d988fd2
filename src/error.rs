//! Error types for the forecast shell
//!
//! The engine itself is total; only the shell around it can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Failures of the shell's storage, configuration and export paths.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Could not read or write the state file.
    #[error("State file {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file is unreadable or malformed.
    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Chart export failed.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl ForecastError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Ways a chart export can fail.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No forecast to draw, or the panel has no area.
    #[error("chart panel is not available")]
    EmptyPanel,

    /// Another capture of the panel is still running.
    #[error("an export is already in progress")]
    InFlight,

    /// The scaled panel overflows or exceeds the raster size limit.
    #[error("chart panel at scale {scale} is too large to rasterize")]
    TooLarge { scale: u32 },

    /// The PNG encoder rejected the raster.
    #[error("could not encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// Could not write the image file.
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
