use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub const CURRENCY: &str = "FCFA";

/// Whole FCFA with digits grouped by three, e.g. `554 000 FCFA`
pub fn format_fcfa(amount: Decimal) -> String {
    format!("{} {}", group_digits(amount), CURRENCY)
}

/// Whole amount with digits grouped by three and no currency suffix
pub fn group_digits(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// Rate label for a fraction, e.g. `0.05` -> `5%`
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_fcfa(dec!(554000)), "554 000 FCFA");
        assert_eq!(format_fcfa(dec!(4674000)), "4 674 000 FCFA");
        assert_eq!(format_fcfa(dec!(999)), "999 FCFA");
        assert_eq!(format_fcfa(dec!(1000)), "1 000 FCFA");
        assert_eq!(format_fcfa(Decimal::ZERO), "0 FCFA");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(group_digits(dec!(1234.5)), "1 235");
        assert_eq!(group_digits(dec!(1234.49)), "1 234");
        assert_eq!(group_digits(dec!(-1500.5)), "-1 501");
    }

    #[test]
    fn drops_trailing_scale() {
        assert_eq!(format_fcfa(dec!(500000.00)), "500 000 FCFA");
    }

    #[test]
    fn percent_labels() {
        assert_eq!(format_percent(dec!(0.05)), "5%");
        assert_eq!(format_percent(dec!(0.18)), "18%");
        assert_eq!(format_percent(dec!(0.005)), "0.5%");
        assert_eq!(format_percent(dec!(0.30)), "30%");
    }
}
