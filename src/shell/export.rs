//! PNG export of the chart panel

use super::chart::ChartPanel;
use crate::error::ExportError;
use crate::forecast::ForecastResult;
use chrono::NaiveDate;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEFAULT_EXPORT_PREFIX: &str = "financial-forecast";
pub const DEFAULT_EXPORT_SCALE: u32 = 2;

/// `<prefix>-<YYYY-MM-DD>.png`
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.png", prefix, date.format("%Y-%m-%d"))
}

/// Rasterizes the chart panel to disk, one capture at a time
#[derive(Debug)]
pub struct ChartExporter {
    panel: ChartPanel,
    scale: u32,
    prefix: String,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the capture ends, however it ends
pub(crate) struct CaptureGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ChartExporter {
    pub fn new(panel: ChartPanel, scale: u32, prefix: impl Into<String>) -> Self {
        Self {
            panel,
            scale,
            prefix: prefix.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub(crate) fn try_begin(&self) -> Result<CaptureGuard<'_>, ExportError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ExportError::InFlight)?;
        Ok(CaptureGuard { flag: &self.in_flight })
    }

    /// Write the panel for `result` into `dir`
    ///
    /// The image goes to a temporary file first and is renamed into place, so a
    /// failed export never leaves a partial `.png` behind.
    pub fn export(
        &self,
        result: Option<&ForecastResult>,
        dir: &Path,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let _guard = self.try_begin()?;

        let result = result.ok_or(ExportError::EmptyPanel)?;
        if self.panel.is_empty() || self.scale == 0 || result.records.is_empty() {
            return Err(ExportError::EmptyPanel);
        }

        let img = self
            .panel
            .render(result, self.scale)
            .ok_or(ExportError::TooLarge { scale: self.scale })?;

        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let target = dir.join(export_filename(&self.prefix, date));
        let partial = target.with_extension("png.part");

        if let Err(e) = img.save_with_format(&partial, ImageFormat::Png) {
            let _ = fs::remove_file(&partial);
            return Err(ExportError::Encode(e));
        }
        fs::rename(&partial, &target).map_err(|source| {
            let _ = fs::remove_file(&partial);
            ExportError::Io {
                path: target.clone(),
                source,
            }
        })?;

        log::info!("exported chart panel to {}", target.display());
        Ok(target)
    }
}

impl Default for ChartExporter {
    fn default() -> Self {
        Self::new(ChartPanel::default(), DEFAULT_EXPORT_SCALE, DEFAULT_EXPORT_PREFIX)
    }
}
