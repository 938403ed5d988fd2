//! Growth model constants for the monthly forecast

use serde::{Deserialize, Serialize};

/// Fixed growth assumptions applied on every forecast run
///
/// The default model is the one `generate_forecast` uses. The constants are
/// deliberately independent of the three user inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthModel {
    /// Customer base before the first simulated month
    pub starting_customers: u64,

    /// Monthly compounding customer growth (0.15 = 15%)
    pub customer_growth_rate: f64,

    /// Monthly fully loaded cost of one employee
    pub cost_per_employee: f64,

    /// A hiring event happens at every month index divisible by this (except 0)
    pub hiring_interval: usize,

    /// Fraction of the initial headcount hired at each hiring event
    pub hiring_fraction: f64,
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self {
            starting_customers: 100,
            customer_growth_rate: 0.15,
            cost_per_employee: 5000.0,
            hiring_interval: 3,
            hiring_fraction: 0.2,
        }
    }
}

impl GrowthModel {
    /// New customers gained in a month, floored to whole customers
    pub fn customer_growth(&self, customers: u64) -> u64 {
        (customers as f64 * self.customer_growth_rate).floor() as u64
    }

    /// Employees added at each hiring event
    ///
    /// Always a fraction of the *initial* headcount, not of the current team.
    pub fn hiring_increment(&self, initial_headcount: i64) -> i64 {
        (initial_headcount as f64 * self.hiring_fraction).floor() as i64
    }

    /// Whether month index `i` (0-based) carries a hiring event
    pub fn is_hiring_month(&self, month_index: usize) -> bool {
        self.hiring_interval > 0 && month_index > 0 && month_index % self.hiring_interval == 0
    }

    /// Payroll for a given headcount
    pub fn employee_cost(&self, headcount: i64) -> f64 {
        headcount as f64 * self.cost_per_employee
    }
}
