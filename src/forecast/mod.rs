//! Twelve-month forecast engine and aggregate reducers

mod state;
mod engine;
mod records;

pub use state::ForecastState;
pub use engine::{generate_forecast, ForecastEngine};
pub use records::{summarize, ForecastResult, ForecastSummary, MonthlyRecord, FORECAST_MONTHS, MONTH_LABELS};
