//! Financial Forecast - twelve-month revenue, expense and headcount projection
//!
//! This library provides:
//! - A pure, deterministic forecast engine driven by three inputs
//! - Aggregate metrics (annual revenue, annual expenses, net cash flow, burn rate)
//! - Batch and sweep runs across input ranges
//! - A presentation shell: usage counter, currency formatting, PNG chart export

pub mod assumptions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod scenario;
pub mod shell;

// Re-export commonly used types
pub use assumptions::{ForecastInputs, GrowthModel, InputRange};
pub use error::{ExportError, ForecastError};
pub use forecast::{generate_forecast, ForecastEngine, ForecastResult, ForecastSummary, MonthlyRecord};
pub use scenario::{ScenarioRunner, SweepAxis};
