//! Core forecast engine for the twelve-month projection

use crate::assumptions::{ForecastInputs, GrowthModel};
use super::state::ForecastState;
use super::records::{ForecastResult, MonthlyRecord, MONTH_LABELS};

/// Forecast engine bound to a growth model
///
/// Holds no mutable state, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    model: GrowthModel,
}

impl ForecastEngine {
    pub fn new(model: GrowthModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &GrowthModel {
        &self.model
    }

    /// Run the forecast for one set of inputs
    pub fn project(&self, inputs: &ForecastInputs) -> ForecastResult {
        let mut state = ForecastState::new(&self.model, inputs.initial_headcount);
        let mut records = Vec::with_capacity(MONTH_LABELS.len());

        for label in MONTH_LABELS {
            let record = self.calculate_month(label, inputs, &mut state);
            records.push(record);
            state.advance_month();
        }

        log::debug!(
            "forecast spending={} price={} headcount={} -> {} customers after {} months",
            inputs.monthly_spending,
            inputs.price_per_customer,
            inputs.initial_headcount,
            state.customers,
            records.len(),
        );

        ForecastResult::from_records(records)
    }

    /// Calculate a single month
    ///
    /// Expenses use the headcount from before this month's hiring event, while
    /// the emitted headcount already includes it.
    fn calculate_month(
        &self,
        label: &str,
        inputs: &ForecastInputs,
        state: &mut ForecastState,
    ) -> MonthlyRecord {
        state.grow_customers(&self.model);
        let revenue = state.customers as f64 * inputs.price_per_customer;

        let employee_cost = self.model.employee_cost(state.headcount);
        let expenses = inputs.monthly_spending + employee_cost;

        state.apply_hiring(&self.model);

        MonthlyRecord {
            month: label.to_string(),
            revenue,
            expenses,
            cash_flow: revenue - expenses,
            headcount: state.headcount,
        }
    }
}

/// Forecast with the default growth model
pub fn generate_forecast(
    monthly_spending: f64,
    price_per_customer: f64,
    initial_headcount: i64,
) -> ForecastResult {
    let inputs = ForecastInputs::new(monthly_spending, price_per_customer, initial_headcount);
    ForecastEngine::default().project(&inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_twelve_months_in_calendar_order() {
        let result = generate_forecast(50_000.0, 100.0, 10);
        assert_eq!(result.records.len(), 12);

        let labels: Vec<&str> = result.records.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
    }

    #[test]
    fn test_first_month_revenue_reflects_one_growth_step() {
        let result = generate_forecast(50_000.0, 100.0, 10);
        assert_relative_eq!(result.records[0].revenue, 11_500.0);
    }

    #[test]
    fn test_headcount_steps() {
        let result = generate_forecast(50_000.0, 100.0, 10);
        let headcount = result.headcount_series();
        assert_eq!(headcount, vec![10, 10, 10, 12, 12, 12, 14, 14, 14, 16, 16, 16]);
    }

    #[test]
    fn test_hiring_month_expense_uses_pre_hire_headcount() {
        let result = generate_forecast(50_000.0, 100.0, 10);

        // Apr: headcount recorded as 12 but payroll still 10 * 5000
        assert_eq!(result.records[3].headcount, 12);
        assert_relative_eq!(result.records[3].expenses, 100_000.0);
        // May pays for the new hires
        assert_relative_eq!(result.records[4].expenses, 110_000.0);
    }

    #[test]
    fn test_headcount_non_decreasing_and_increments() {
        let model = GrowthModel::default();
        for initial in [1, 4, 5, 7, 10, 23, 50] {
            let result = generate_forecast(10_000.0, 10.0, initial);
            let increment = model.hiring_increment(initial);
            for (i, pair) in result.records.windows(2).enumerate() {
                let step = pair[1].headcount - pair[0].headcount;
                if model.is_hiring_month(i + 1) {
                    assert_eq!(step, increment);
                } else {
                    assert_eq!(step, 0);
                }
            }
        }
    }

    #[test]
    fn test_customers_strictly_increasing() {
        // With price 1, revenue equals the customer count
        let result = generate_forecast(0.0, 1.0, 0);
        let customers = result.revenue_series();
        assert!(customers.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(customers[0], 115.0);
        assert_relative_eq!(customers[1], 132.0);
    }

    #[test]
    fn test_reconciliation_and_burn_rate() {
        let result = generate_forecast(75_000.0, 240.0, 17);
        let summary = result.summary();

        assert_eq!(summary.total_revenue - summary.total_expenses, summary.net_cash_flow);
        assert_eq!(summary.total_expenses / 12.0, summary.burn_rate);

        let total_revenue: f64 = result.records.iter().map(|r| r.revenue).sum();
        assert_eq!(summary.total_revenue, total_revenue);
    }

    #[test]
    fn test_cash_flow_is_revenue_minus_expenses() {
        let result = generate_forecast(120_000.0, 30.0, 40);
        for row in &result.records {
            assert_eq!(row.cash_flow, row.revenue - row.expenses);
        }
        assert!(result.records[0].cash_flow < 0.0);
    }

    #[test]
    fn test_idempotent() {
        let a = generate_forecast(65_000.0, 110.0, 9);
        let b = generate_forecast(65_000.0, 110.0, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_inputs_produce_full_result() {
        let result = generate_forecast(0.0, 0.0, 0);
        assert_eq!(result.records.len(), 12);
        for row in &result.records {
            assert_eq!(row.expenses, 0.0);
            assert_eq!(row.revenue, 0.0);
            assert_eq!(row.headcount, 0);
        }
        assert_eq!(result.summary().burn_rate, 0.0);
        assert!(result.summary().net_cash_flow.is_finite());
    }

    #[test]
    fn test_extreme_headcount_saturates() {
        let high = generate_forecast(50_000.0, 100.0, i64::MAX);
        assert_eq!(high.records.len(), 12);
        assert_eq!(high.records[11].headcount, i64::MAX);

        let low = generate_forecast(50_000.0, 100.0, i64::MIN);
        assert_eq!(low.records.len(), 12);
        assert_eq!(low.records[11].headcount, i64::MIN);
        assert!(low.summary().total_expenses.is_finite());
    }

    #[test]
    fn test_negative_inputs_do_not_panic() {
        let result = generate_forecast(-1_000.0, -5.0, -10);
        assert_eq!(result.records.len(), 12);
        assert_eq!(result.records[0].headcount, -10);
        assert_eq!(result.records[11].headcount, -16);
    }
}
