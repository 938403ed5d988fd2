//! Presentation shell around the forecast engine

pub mod chart;
pub mod counter;
pub mod export;
pub mod format;
pub mod session;

pub use chart::ChartPanel;
pub use counter::{CounterStore, FileCounterStore, MemoryCounterStore, UsageCounter, USAGE_COUNTER_KEY};
pub use export::{export_filename, ChartExporter};
pub use format::CurrencyFormatter;
pub use session::{ForecastSession, InputChange};
