//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::pricing::PricingError;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from line or cart total calculation.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Calculate a percentage of a money amount, rounded to whole minor units.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented in minor
/// units.
pub fn percent_of<'a>(
    percent: &Percentage,
    amount: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// Halves round away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
