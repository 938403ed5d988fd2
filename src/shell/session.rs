//! Interactive forecast session
//!
//! Owns the three inputs and the displayed forecast. Every distinct input
//! change recomputes the forecast from scratch and bumps the usage counter.

use super::counter::UsageCounter;
use super::export::ChartExporter;
use crate::assumptions::{ForecastInputs, HEADCOUNT_RANGE, PRICING_RANGE, SPENDING_RANGE};
use crate::forecast::{ForecastEngine, ForecastResult};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// A change to one of the three inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputChange {
    MonthlySpending(f64),
    PricePerCustomer(f64),
    InitialHeadcount(i64),
}

pub struct ForecastSession {
    engine: ForecastEngine,
    inputs: ForecastInputs,
    result: ForecastResult,
    counter: UsageCounter,
    exporter: ChartExporter,
}

impl ForecastSession {
    pub fn new(inputs: ForecastInputs, counter: UsageCounter, exporter: ChartExporter) -> Self {
        let engine = ForecastEngine::default();
        let result = engine.project(&inputs);
        Self {
            engine,
            inputs,
            result,
            counter,
            exporter,
        }
    }

    pub fn inputs(&self) -> &ForecastInputs {
        &self.inputs
    }

    pub fn result(&self) -> &ForecastResult {
        &self.result
    }

    pub fn usage_count(&self) -> u64 {
        self.counter.value()
    }

    /// Apply a change; returns false when the value was already current
    pub fn on_input_changed(&mut self, change: InputChange) -> bool {
        let mut next = self.inputs;
        let (range, value) = match change {
            InputChange::MonthlySpending(v) => {
                next.monthly_spending = v;
                (SPENDING_RANGE, v)
            }
            InputChange::PricePerCustomer(v) => {
                next.price_per_customer = v;
                (PRICING_RANGE, v)
            }
            InputChange::InitialHeadcount(v) => {
                next.initial_headcount = v;
                (HEADCOUNT_RANGE, v as f64)
            }
        };
        if same_inputs(&next, &self.inputs) {
            return false;
        }

        if !range.contains(value) {
            log::warn!("{:?} is outside the slider range {}..={}", change, range.min, range.max);
        }

        self.inputs = next;
        self.result = self.engine.project(&self.inputs);

        match self.counter.increment() {
            Ok(count) => log::debug!("input change #{} applied: {:?}", count, change),
            Err(e) => log::warn!("usage counter not persisted: {}", e),
        }
        true
    }

    /// Export the current chart panel; failures are logged and yield `None`
    pub fn export_chart(&self, dir: &Path, date: NaiveDate) -> Option<PathBuf> {
        match self.exporter.export(Some(&self.result), dir, date) {
            Ok(path) => Some(path),
            Err(e) => {
                log::error!("chart export failed: {}", e);
                None
            }
        }
    }
}

/// Bitwise comparison, so a repeated NaN is not a change
fn same_inputs(a: &ForecastInputs, b: &ForecastInputs) -> bool {
    a.monthly_spending.to_bits() == b.monthly_spending.to_bits()
        && a.price_per_customer.to_bits() == b.price_per_customer.to_bits()
        && a.initial_headcount == b.initial_headcount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::generate_forecast;
    use crate::shell::chart::ChartPanel;
    use crate::shell::counter::MemoryCounterStore;

    fn session() -> ForecastSession {
        ForecastSession::new(
            ForecastInputs::default(),
            UsageCounter::load(Box::new(MemoryCounterStore::new(3))),
            ChartExporter::default(),
        )
    }

    #[test]
    fn test_distinct_change_recomputes_and_counts() {
        let mut s = session();
        assert_eq!(s.usage_count(), 3);

        assert!(s.on_input_changed(InputChange::PricePerCustomer(200.0)));
        assert_eq!(s.usage_count(), 4);
        assert_eq!(s.result(), &generate_forecast(50_000.0, 200.0, 10));

        assert!(s.on_input_changed(InputChange::InitialHeadcount(20)));
        assert_eq!(s.usage_count(), 5);
        assert_eq!(s.result().records[0].headcount, 20);
    }

    #[test]
    fn test_same_value_is_not_a_change() {
        let mut s = session();
        let before = s.result().clone();
        assert!(!s.on_input_changed(InputChange::MonthlySpending(50_000.0)));
        assert_eq!(s.usage_count(), 3);
        assert_eq!(s.result(), &before);
    }

    #[test]
    fn test_repeated_nan_counts_once() {
        let mut s = session();
        assert!(s.on_input_changed(InputChange::MonthlySpending(f64::NAN)));
        assert!(!s.on_input_changed(InputChange::MonthlySpending(f64::NAN)));
        assert_eq!(s.usage_count(), 4);
        assert_eq!(s.result().records.len(), 12);
    }

    #[test]
    fn test_export_failure_is_none() {
        let s = ForecastSession::new(
            ForecastInputs::default(),
            UsageCounter::load(Box::new(MemoryCounterStore::default())),
            ChartExporter::new(ChartPanel { height: 0, ..ChartPanel::default() }, 2, "x"),
        );
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert!(s.export_chart(&std::env::temp_dir(), date).is_none());
    }
}
