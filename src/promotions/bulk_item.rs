//! Bulk Item Promotion
//!
//! Each line with at least `min_quantity` units is discounted by `rate` of its line total. Lines
//! are considered independently; the discount is the sum across all qualifying lines.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of},
    orders::Order,
    promotions::DiscountStrategy,
};

/// Percentage off every line bought in bulk.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemPromotion {
    min_quantity: u32,
    rate: Percentage,
}

impl BulkItemPromotion {
    /// Create a new bulk item promotion.
    pub fn new(min_quantity: u32, rate: Percentage) -> Self {
        Self { min_quantity, rate }
    }

    /// Return the number of units a line needs to qualify.
    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    /// Return the discount rate.
    pub fn rate(&self) -> &Percentage {
        &self.rate
    }
}

impl Default for BulkItemPromotion {
    /// 10% off each line with 20 or more units.
    fn default() -> Self {
        Self::new(20, Percentage::from(Decimal::new(10, 2)))
    }
}

impl DiscountStrategy for BulkItemPromotion {
    fn discount<'a>(&self, order: &Order<'a>) -> Result<Money<'a, Currency>, DiscountError> {
        order
            .cart()
            .iter()
            .filter(|item| item.quantity() >= self.min_quantity)
            .try_fold(
                Money::from_minor(0, order.currency()),
                |acc, item| -> Result<_, DiscountError> {
                    Ok(acc.add(percent_of(&self.rate, &item.total()?)?)?)
                },
            )
    }
}
