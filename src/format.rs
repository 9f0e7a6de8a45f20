//! display formatting for amounts, US locale conventions

use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::Money;

/// format as US dollars with exactly two fraction digits, e.g. `$1,798.65`
pub fn format_currency(amount: Money) -> String {
    let digits = format_number(amount.as_decimal().abs(), 2);
    if amount.round_cents().is_negative() {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// format with thousands separators and a fixed number of fraction digits
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match plain.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(plain.len() + whole.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(format_currency(Money::from_decimal(dec!(1798.65157546))), "$1,798.65");
        assert_eq!(format_currency(Money::from_major(300_000)), "$300,000.00");
        assert_eq!(format_currency(Money::ZERO), "$0.00");
        assert_eq!(format_currency(Money::from_decimal(dec!(0.005))), "$0.01");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(Money::from_decimal(dec!(-1234.5))), "-$1,234.50");
        // rounds to zero, no sign
        assert_eq!(format_currency(Money::from_decimal(dec!(-0.001))), "$0.00");
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(format_number(dec!(1234567.891), 0), "1,234,568");
        assert_eq!(format_number(dec!(999), 0), "999");
        assert_eq!(format_number(dec!(1000), 1), "1,000.0");
        assert_eq!(format_number(dec!(-12345.678), 2), "-12,345.68");
        assert_eq!(format_number(dec!(100000), 0), "100,000");
    }
}
