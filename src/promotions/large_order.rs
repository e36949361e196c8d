//! Large Order Promotion
//!
//! Orders containing at least `min_distinct_items` different products get `rate` off the whole
//! cart total. Quantities do not count towards the threshold.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of},
    orders::Order,
    promotions::DiscountStrategy,
};

/// Percentage off orders with many distinct products.
#[derive(Debug, Clone, PartialEq)]
pub struct LargeOrderPromotion {
    min_distinct_items: usize,
    rate: Percentage,
}

impl LargeOrderPromotion {
    /// Create a new large order promotion.
    pub fn new(min_distinct_items: usize, rate: Percentage) -> Self {
        Self {
            min_distinct_items,
            rate,
        }
    }

    /// Return the number of distinct products an order needs to qualify.
    pub fn min_distinct_items(&self) -> usize {
        self.min_distinct_items
    }

    /// Return the discount rate.
    pub fn rate(&self) -> &Percentage {
        &self.rate
    }
}

impl Default for LargeOrderPromotion {
    /// 7% off orders with 10 or more distinct products.
    fn default() -> Self {
        Self::new(10, Percentage::from(Decimal::new(7, 2)))
    }
}

impl DiscountStrategy for LargeOrderPromotion {
    fn discount<'a>(&self, order: &Order<'a>) -> Result<Money<'a, Currency>, DiscountError> {
        if order.distinct_products() >= self.min_distinct_items {
            percent_of(&self.rate, &order.total())
        } else {
            Ok(Money::from_minor(0, order.currency()))
        }
    }
}
