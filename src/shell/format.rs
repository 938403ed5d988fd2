//! Currency formatting for display

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormatter {
    pub symbol: String,
    /// Digits after the decimal point
    pub decimals: usize,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 0,
        }
    }
}

impl CurrencyFormatter {
    /// Render an amount as `$12,345` or `-$12,345`
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}", self.symbol, amount);
        }

        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (fixed.as_str(), None),
        };

        let grouped = group_thousands(whole);
        let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

        match fraction {
            Some(f) => format!("{}{}{}.{}", sign, self.symbol, grouped, f),
            None => format!("{}{}{}", sign, self.symbol, grouped),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_dollars() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format(11_500.0), "$11,500");
        assert_eq!(fmt.format(999.0), "$999");
        assert_eq!(fmt.format(1_234_567.0), "$1,234,567");
        assert_eq!(fmt.format(0.0), "$0");
    }

    #[test]
    fn test_format_negative() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format(-2_500.0), "-$2,500");
        assert_eq!(fmt.format(-0.2), "$0");
    }

    #[test]
    fn test_format_with_cents() {
        let fmt = CurrencyFormatter { symbol: "$".to_string(), decimals: 2 };
        assert_eq!(fmt.format(4_166.666), "$4,166.67");
    }
}
