//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while calculating line or cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A total did not fit in minor units.
    #[error("total overflowed the range of minor units")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total price of a cart of line items.
///
/// An empty cart totals zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: A line total did not fit in minor units.
/// - [`PricingError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[LineItem<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    items
        .iter()
        .try_fold(
            Money::from_minor(0, currency),
            |acc, item| -> Result<_, PricingError> { Ok(acc.add(item.total()?)?) },
        )
}
