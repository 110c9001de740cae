//! Markup pricing applied on top of unit base costs.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Validation errors returned when constructing a [`MarkupPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkupPolicyValidationError {
    /// Markup percentage is below zero.
    #[error("markup percentage must not be negative")]
    NegativePercent,
}

/// System-wide percentage markup added to every quoted cost.
///
/// Amounts are fixed-point and rounded to two decimal places, midpoints
/// away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupPolicy {
    rate: Decimal,
}

impl MarkupPolicy {
    /// Build a policy from a percentage, e.g. `15` for a 15% markup.
    pub fn new(percent: Decimal) -> Result<Self, MarkupPolicyValidationError> {
        if percent.is_sign_negative() {
            return Err(MarkupPolicyValidationError::NegativePercent);
        }
        let rate = (percent / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Ok(Self { rate })
    }

    /// Add the markup to `base` and round to cents.
    pub fn apply(&self, base: Decimal) -> Decimal {
        (base + base * self.rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(dec!(10), dec!(100), dec!(110.00))]
    #[case(dec!(15), dec!(100), dec!(115.00))]
    #[case(dec!(0), dec!(100), dec!(100.00))]
    #[case(dec!(15), dec!(0.10), dec!(0.12))]
    fn apply_adds_percentage_and_rounds_to_cents(
        #[case] percent: Decimal,
        #[case] base: Decimal,
        #[case] expected: Decimal,
    ) {
        let policy = MarkupPolicy::new(percent).expect("valid percent");
        assert_eq!(policy.apply(base), expected);
    }

    #[rstest]
    fn midpoints_round_away_from_zero() {
        // 15% of 0.30 is 0.045; the half cent rounds up.
        let policy = MarkupPolicy::new(dec!(15)).expect("valid percent");
        assert_eq!(policy.apply(dec!(0.30)), dec!(0.35));
    }

    #[rstest]
    fn negative_percent_is_rejected() {
        let result = MarkupPolicy::new(dec!(-1));
        assert_eq!(result, Err(MarkupPolicyValidationError::NegativePercent));
    }
}
