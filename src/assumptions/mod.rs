//! Forecast inputs and the fixed growth assumptions

mod growth;
mod ranges;

pub use growth::GrowthModel;
pub use ranges::{InputRange, HEADCOUNT_RANGE, PRICING_RANGE, SPENDING_RANGE};

use serde::{Deserialize, Serialize};

/// The three user-adjustable assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastInputs {
    /// Operating cost floor, independent of headcount
    pub monthly_spending: f64,

    /// Average monthly revenue per customer
    pub price_per_customer: f64,

    /// Team size at month index 0
    pub initial_headcount: i64,
}

impl ForecastInputs {
    pub fn new(monthly_spending: f64, price_per_customer: f64, initial_headcount: i64) -> Self {
        Self {
            monthly_spending,
            price_per_customer,
            initial_headcount,
        }
    }
}

impl Default for ForecastInputs {
    /// Starting values of the reference sliders
    fn default() -> Self {
        Self::new(50_000.0, 100.0, 10)
    }
}
