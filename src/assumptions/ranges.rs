//! Input ranges offered by the shell
//!
//! These are UI affordances only. The engine accepts any value.

use serde::{Deserialize, Serialize};

/// Inclusive stepped range for one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Monthly operating spend: 10,000 to 200,000 in steps of 5,000
pub const SPENDING_RANGE: InputRange = InputRange { min: 10_000.0, max: 200_000.0, step: 5_000.0 };

/// Price per customer: 10 to 1,000 in steps of 10
pub const PRICING_RANGE: InputRange = InputRange { min: 10.0, max: 1_000.0, step: 10.0 };

/// Initial headcount: 1 to 50 in steps of 1
pub const HEADCOUNT_RANGE: InputRange = InputRange { min: 1.0, max: 50.0, step: 1.0 };

impl InputRange {
    /// Clamp into the range and round to the nearest step from `min`
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.max(self.min).min(self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Every stepped value from `min` to `max` inclusive
    pub fn values(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.max < self.min {
            return vec![self.min];
        }
        let count = ((self.max - self.min) / self.step).floor() as usize + 1;
        (0..count).map(|i| self.min + i as f64 * self.step).collect()
    }
}
