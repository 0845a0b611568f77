use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Number of cents in one currency unit
const CENTS_PER_UNIT: u64 = 100;

/// A monetary amount held as whole cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Fee(u64);

impl Fee {
    /// No charge
    pub const ZERO: Self = Self(0);

    /// Create a fee from an amount in cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// The amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// The amount in currency units, for display or interop only
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Fee {
    #[allow(clippy::arithmetic_side_effects)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT))
    }
}

/// An exact rational factor applied to a fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Multiplier {
    /// Factor numerator
    pub numerator: u64,
    /// Factor denominator, must not be zero
    pub denominator: u64,
}

impl Multiplier {
    /// The identity factor
    pub const ONE: Self = Self::new(1, 1);

    /// Create a factor of `numerator / denominator`
    #[must_use]
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self { numerator, denominator }
    }

    /// Reject factors that cannot be applied
    fn validate(self, name: &str) -> Result<()> {
        if self.denominator == 0 {
            return Err(LibraryError::InvalidFeePolicy(format!("{name} has a zero denominator")));
        }
        Ok(())
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Pricing rules for late returns
///
/// Every overdue day costs `daily_rate_cents`. Bestsellers are scaled by
/// `bestseller_multiplier`, then premium members get `premium_discount`
/// applied on top. The result is rounded half-up to whole cents once, after
/// all factors are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeePolicy {
    /// Charge per overdue day, in cents
    pub daily_rate_cents: u64,
    /// Factor applied to bestseller titles
    pub bestseller_multiplier: Multiplier,
    /// Factor applied for premium members
    pub premium_discount: Multiplier,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            daily_rate_cents: 50,
            bestseller_multiplier: Multiplier::new(3, 2),
            premium_discount: Multiplier::new(4, 5),
        }
    }
}

impl FeePolicy {
    /// Parse and validate a policy from JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the document is not a valid policy, or
    /// `LibraryError::InvalidFeePolicy` if a factor has a zero denominator
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that every factor can be applied
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidFeePolicy` if a factor has a zero denominator
    pub fn validate(&self) -> Result<()> {
        self.bestseller_multiplier.validate("bestseller_multiplier")?;
        self.premium_discount.validate("premium_discount")
    }

    /// Compute the fee for returning a book `overdue_days` late
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if `overdue_days` is negative,
    /// `LibraryError::InvalidFeePolicy` if the policy is unusable, and
    /// `LibraryError::FeeOverflow` if the amount does not fit in a `Fee`
    pub fn late_fee(
        &self,
        overdue_days: i64,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> Result<Fee> {
        if overdue_days < 0 {
            return Err(LibraryError::negative_overdue_days());
        }
        self.validate()?;

        let overflow = || LibraryError::FeeOverflow { overdue_days };
        let days = u128::try_from(overdue_days).map_err(|_| LibraryError::negative_overdue_days())?;

        let mut numerator =
            days.checked_mul(u128::from(self.daily_rate_cents)).ok_or_else(overflow)?;
        let mut denominator: u128 = 1;

        // Bestseller scaling comes before the member discount.
        let factors = [
            (is_bestseller, self.bestseller_multiplier),
            (is_premium_member, self.premium_discount),
        ];
        for (applies, factor) in factors {
            if applies {
                numerator =
                    numerator.checked_mul(u128::from(factor.numerator)).ok_or_else(overflow)?;
                denominator =
                    denominator.checked_mul(u128::from(factor.denominator)).ok_or_else(overflow)?;
            }
        }

        let cents = round_half_up(numerator, denominator).ok_or_else(overflow)?;
        let fee = u64::try_from(cents).map(Fee).map_err(|_| overflow())?;
        log::trace!(
            "late fee for {overdue_days} days (bestseller: {is_bestseller}, premium: {is_premium_member}) is {fee}"
        );
        Ok(fee)
    }
}

/// Divide, rounding halves away from zero
fn round_half_up(numerator: u128, denominator: u128) -> Option<u128> {
    numerator.checked_add(denominator.checked_div(2)?)?.checked_div(denominator)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Shorthand for the default policy
    fn fee(days: i64, bestseller: bool, premium: bool) -> Result<Fee> {
        FeePolicy::default().late_fee(days, bestseller, premium)
    }

    #[test]
    fn test_flat_daily_rate() {
        assert_eq!(fee(10, false, false), Ok(Fee::from_cents(500)));
        assert_eq!(fee(13, false, false), Ok(Fee::from_cents(650)));
        assert_eq!(fee(1, false, false), Ok(Fee::from_cents(50)));
    }

    #[test]
    fn test_bestseller_and_premium_factors() {
        assert_eq!(fee(13, true, false), Ok(Fee::from_cents(975)));
        assert_eq!(fee(13, false, true), Ok(Fee::from_cents(520)));
        assert_eq!(fee(13, true, true), Ok(Fee::from_cents(780)));
    }

    #[test]
    fn test_zero_days_is_free() {
        for (bestseller, premium) in [(false, false), (true, false), (false, true), (true, true)] {
            assert_eq!(fee(0, bestseller, premium), Ok(Fee::ZERO));
        }
    }

    #[test]
    fn test_negative_days_rejected() {
        let err = fee(-1, true, true).unwrap_err();
        assert_eq!(err.to_string(), "Overdue days cannot be negative.");
        assert_eq!(err, LibraryError::InvalidArgument("Overdue days cannot be negative.".into()));
    }

    #[test]
    fn test_fee_display() {
        assert_eq!(Fee::from_cents(500).to_string(), "5.00");
        assert_eq!(Fee::from_cents(780).to_string(), "7.80");
        assert_eq!(Fee::from_cents(5).to_string(), "0.05");
        assert_eq!(Fee::ZERO.to_string(), "0.00");
        assert_eq!(format!("{:>6}", Fee::from_cents(650)), "  6.50");
        assert!((Fee::from_cents(975).as_f64() - 9.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_policy_rounds_half_up() {
        let policy = FeePolicy {
            daily_rate_cents: 25,
            bestseller_multiplier: Multiplier::new(3, 2),
            premium_discount: Multiplier::ONE,
        };
        // 3 days * 25 = 75 cents, * 1.5 = 112.5 cents
        assert_eq!(policy.late_fee(3, true, false), Ok(Fee::from_cents(113)));
    }

    #[test]
    fn test_overflow_is_reported() {
        let policy = FeePolicy { daily_rate_cents: u64::MAX, ..FeePolicy::default() };
        assert_eq!(
            policy.late_fee(i64::MAX, true, true),
            Err(LibraryError::FeeOverflow { overdue_days: i64::MAX })
        );
    }

    #[test]
    fn test_policy_from_json() {
        let policy = FeePolicy::from_json_str(r#"{ "daily_rate_cents": 100 }"#)
            .unwrap_or_else(|e| panic!("policy should parse: {e}"));
        assert_eq!(policy.daily_rate_cents, 100);
        assert_eq!(policy.bestseller_multiplier, Multiplier::new(3, 2));
        assert_eq!(policy.late_fee(2, false, true), Ok(Fee::from_cents(160)));
    }

    #[test]
    fn test_policy_rejects_zero_denominator() {
        let json = r#"{ "premium_discount": { "numerator": 1, "denominator": 0 } }"#;
        assert!(matches!(
            FeePolicy::from_json_str(json),
            Err(LibraryError::InvalidFeePolicy(msg)) if msg.contains("premium_discount")
        ));
    }

    #[test]
    fn test_policy_rejects_unknown_fields() {
        assert!(matches!(
            FeePolicy::from_json_str(r#"{ "daily_rate": 50 }"#),
            Err(LibraryError::Config(_))
        ));
    }
}
