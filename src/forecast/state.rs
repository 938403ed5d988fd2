//! Running state carried from one simulated month to the next

use crate::assumptions::GrowthModel;

/// State of the forecast at the start of a month
#[derive(Debug, Clone)]
pub struct ForecastState {
    /// 0-based index of the month being simulated
    pub month_index: usize,

    /// Customer count (internal, not emitted on records)
    pub customers: u64,

    /// Current team size
    pub headcount: i64,

    /// Team size the forecast started with; hiring events scale from this
    pub initial_headcount: i64,
}

impl ForecastState {
    /// Initialize state at projection start
    pub fn new(model: &GrowthModel, initial_headcount: i64) -> Self {
        Self {
            month_index: 0,
            customers: model.starting_customers,
            headcount: initial_headcount,
            initial_headcount,
        }
    }

    /// Compound customer growth for the current month
    ///
    /// Runs before revenue is computed, so month 0 already reflects one step.
    pub fn grow_customers(&mut self, model: &GrowthModel) {
        self.customers += model.customer_growth(self.customers);
    }

    /// Apply the hiring event if the current month carries one
    pub fn apply_hiring(&mut self, model: &GrowthModel) {
        if model.is_hiring_month(self.month_index) {
            self.headcount = self.headcount.saturating_add(model.hiring_increment(self.initial_headcount));
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month_index += 1;
    }
}
