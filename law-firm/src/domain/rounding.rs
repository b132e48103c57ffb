//! Decimal rounding for derived hours and amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, halves away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Two decimal places, the scale of every hours and currency field.
pub fn round_2(value: Decimal) -> Decimal {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(round_2(dec!(1.005)), dec!(1.01));
        assert_eq!(round_2(dec!(2.675)), dec!(2.68));
        assert_eq!(round_2(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn below_half_rounds_down() {
        assert_eq!(round_2(dec!(0.0166666)), dec!(0.02));
        assert_eq!(round_2(dec!(7.4949)), dec!(7.49));
    }

    #[test]
    fn values_already_at_scale_are_unchanged() {
        assert_eq!(round_2(dec!(487.5)), dec!(487.50));
        assert_eq!(round_2(dec!(8.50)), dec!(8.5));
        assert_eq!(round_to(dec!(3.14159), 3), dec!(3.142));
    }
}
