//! Forecast output structures and aggregate reducers

use serde::{Deserialize, Serialize};

/// Number of simulated months in every forecast
pub const FORECAST_MONTHS: usize = 12;

/// Calendar labels, in simulation order
pub const MONTH_LABELS: [&str; FORECAST_MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub cash_flow: f64,
    pub headcount: i64,
}

/// Aggregate metrics over the whole horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_cash_flow: f64,
    /// Average monthly expense
    pub burn_rate: f64,
}

/// Reduce a sequence of monthly records into the four aggregates
///
/// Net cash flow comes from the two totals rather than from summing
/// each record's cash flow.
pub fn summarize(records: &[MonthlyRecord]) -> ForecastSummary {
    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_expenses: f64 = records.iter().map(|r| r.expenses).sum();

    ForecastSummary {
        total_revenue,
        total_expenses,
        net_cash_flow: total_revenue - total_expenses,
        burn_rate: total_expenses / FORECAST_MONTHS as f64,
    }
}

/// Complete forecast: the monthly time series and its aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub records: Vec<MonthlyRecord>,
    pub summary: ForecastSummary,
}

impl ForecastResult {
    /// Build a result, deriving the summary from the records
    pub fn from_records(records: Vec<MonthlyRecord>) -> Self {
        let summary = summarize(&records);
        Self { records, summary }
    }

    pub fn summary(&self) -> ForecastSummary {
        self.summary
    }

    pub fn revenue_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.revenue).collect()
    }

    pub fn expense_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.expenses).collect()
    }

    pub fn cash_flow_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cash_flow).collect()
    }

    pub fn headcount_series(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.headcount).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(month: &str, revenue: f64, expenses: f64) -> MonthlyRecord {
        MonthlyRecord {
            month: month.to_string(),
            revenue,
            expenses,
            cash_flow: revenue - expenses,
            headcount: 1,
        }
    }

    #[test]
    fn test_summarize_totals() {
        let records = vec![record("Jan", 100.0, 40.0), record("Feb", 50.0, 80.0)];
        let summary = summarize(&records);

        assert_relative_eq!(summary.total_revenue, 150.0);
        assert_relative_eq!(summary.total_expenses, 120.0);
        assert_relative_eq!(summary.net_cash_flow, 30.0);
        assert_relative_eq!(summary.burn_rate, 10.0);
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.burn_rate, 0.0);
    }
}
