//! Display formatting and the fixed-horizon future value helper

/// Horizons (years) shown in the investment table
pub const FUTURE_VALUE_HORIZONS: [u32; 5] = [1, 3, 5, 10, 15];

/// Value of `amount` after compounding at `rate_percent` for `years`
pub fn future_value(amount: f64, rate_percent: f64, years: u32) -> f64 {
    amount * compound_factor(1.0 + rate_percent / 100.0, years)
}

/// `base^years` for the full `u32` range
pub fn compound_factor(base: f64, years: u32) -> f64 {
    match i32::try_from(years) {
        Ok(n) => base.powi(n),
        Err(_) => base.powf(f64::from(years)),
    }
}

/// US-dollar style, zero decimals: `$1,234,567`, `-$500`
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = group_thousands(rounded.abs());
    if rounded < 0.0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Grouped whole number without a currency symbol: `1,234,567`
pub fn format_currency_value(value: f64) -> String {
    let rounded = value.round();
    let digits = group_thousands(rounded.abs());
    if rounded < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Whole-percent input to two decimals: `8.0` -> `8.00%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

fn group_thousands(value: f64) -> String {
    let raw = format!("{:.0}", value);
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cents(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    #[test]
    fn test_future_value_horizons() {
        let values: Vec<f64> = FUTURE_VALUE_HORIZONS
            .iter()
            .map(|y| cents(future_value(100_000.0, 8.0, *y)))
            .collect();
        assert_eq!(values, vec![108_000.0, 125_971.2, 146_932.81, 215_892.5, 317_216.91]);
    }

    #[test]
    fn test_future_value_year_zero() {
        assert_eq!(future_value(42_000.0, 12.0, 0), 42_000.0);
    }

    #[test]
    fn test_future_value_beyond_i32_horizon() {
        let one_year = future_value(100.0, 8.0, 1);
        assert!(future_value(100.0, 8.0, 3_000_000_000) > one_year);
        assert!(compound_factor(1.03, u32::MAX) > compound_factor(1.03, 1));
        assert_eq!(compound_factor(1.0, 3_000_000_000), 1.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.5), "$1,234,568");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
        assert_eq!(format_currency(7_789_837.08), "$7,789,837");
    }

    #[test]
    fn test_format_currency_value() {
        assert_eq!(format_currency_value(500_000.0), "500,000");
        assert_eq!(format_currency_value(-12.0), "-12");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(8.0), "8.00%");
        assert_eq!(format_percentage(5.85), "5.85%");
        assert_eq!(format_percentage(1.5), "1.50%");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_future_value_monotonic(
            amount in 1.0f64..1e7,
            rate in 0.01f64..20.0,
            y1 in 0u32..40,
            gap in 1u32..20,
        ) {
            prop_assert!(future_value(amount, rate, y1 + gap) > future_value(amount, rate, y1));
        }

        #[test]
        fn prop_grouping_round_trips(value in 0u64..10_000_000_000) {
            let formatted = format_currency_value(value as f64);
            prop_assert_eq!(formatted.replace(',', "").parse::<u64>().unwrap(), value);
        }
    }
}
