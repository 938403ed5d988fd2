//! Scenario runner for batch forecasts
//!
//! Holds one engine and runs many input sets against it, either as an explicit
//! batch or as a sweep across one input's shell range.

use crate::assumptions::{ForecastInputs, GrowthModel, InputRange, HEADCOUNT_RANGE, PRICING_RANGE, SPENDING_RANGE};
use crate::forecast::{ForecastEngine, ForecastResult, ForecastSummary};
use clap::ValueEnum;
use rayon::prelude::*;
use serde::Serialize;

/// Which input a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SweepAxis {
    Spending,
    Price,
    Headcount,
}

impl SweepAxis {
    /// Shell range stepped through for this axis
    pub fn default_range(&self) -> InputRange {
        match self {
            SweepAxis::Spending => SPENDING_RANGE,
            SweepAxis::Price => PRICING_RANGE,
            SweepAxis::Headcount => HEADCOUNT_RANGE,
        }
    }

    /// Copy of `base` with this axis set to `value`
    pub fn apply(&self, base: &ForecastInputs, value: f64) -> ForecastInputs {
        let mut inputs = *base;
        match self {
            SweepAxis::Spending => inputs.monthly_spending = value,
            SweepAxis::Price => inputs.price_per_customer = value,
            SweepAxis::Headcount => inputs.initial_headcount = value as i64,
        }
        inputs
    }
}

/// One point of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub inputs: ForecastInputs,
    pub summary: ForecastSummary,
}

/// Batch runner around a single forecast engine
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ForecastEngine,
}

impl ScenarioRunner {
    /// Create runner with the default growth model
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: GrowthModel) -> Self {
        Self {
            engine: ForecastEngine::new(model),
        }
    }

    pub fn run(&self, inputs: &ForecastInputs) -> ForecastResult {
        self.engine.project(inputs)
    }

    /// Run many input sets in parallel; output order matches input order
    pub fn run_batch(&self, inputs: &[ForecastInputs]) -> Vec<ForecastResult> {
        inputs.par_iter().map(|i| self.engine.project(i)).collect()
    }

    /// Forecast every stepped value of `range` on `axis`, others held at `base`
    pub fn sweep(&self, axis: SweepAxis, range: InputRange, base: &ForecastInputs) -> Vec<SweepPoint> {
        let points: Vec<ForecastInputs> = range
            .values()
            .into_iter()
            .map(|value| axis.apply(base, value))
            .collect();

        log::debug!("sweeping {:?} over {} points", axis, points.len());

        points
            .par_iter()
            .map(|inputs| SweepPoint {
                inputs: *inputs,
                summary: self.engine.project(inputs).summary(),
            })
            .collect()
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_sequential() {
        let runner = ScenarioRunner::new();
        let inputs: Vec<_> = [10_000.0, 50_000.0, 150_000.0]
            .iter()
            .map(|&spend| ForecastInputs::new(spend, 100.0, 10))
            .collect();

        let batch = runner.run_batch(&inputs);
        assert_eq!(batch.len(), 3);
        for (result, input) in batch.iter().zip(&inputs) {
            assert_eq!(result, &runner.run(input));
        }

        // Higher spend should burn faster
        assert!(batch[2].summary().burn_rate > batch[0].summary().burn_rate);
    }

    #[test]
    fn test_sweep_headcount_covers_range() {
        let runner = ScenarioRunner::new();
        let base = ForecastInputs::default();
        let points = runner.sweep(SweepAxis::Headcount, HEADCOUNT_RANGE, &base);

        assert_eq!(points.len(), 50);
        assert_eq!(points[0].inputs.initial_headcount, 1);
        assert_eq!(points[49].inputs.initial_headcount, 50);
        assert!(points.iter().all(|p| p.inputs.monthly_spending == base.monthly_spending));
        assert!(points.windows(2).all(|w| w[1].summary.total_expenses > w[0].summary.total_expenses));
    }

    #[test]
    fn test_sweep_price_revenue_monotone() {
        let runner = ScenarioRunner::new();
        let points = runner.sweep(SweepAxis::Price, SweepAxis::Price.default_range(), &ForecastInputs::default());
        assert_eq!(points.len(), 100);
        assert!(points.windows(2).all(|w| w[1].summary.total_revenue > w[0].summary.total_revenue));
    }
}
