//! Fidelity Promotion
//!
//! Rewards loyal customers: when the customer holds at least `min_points` fidelity points, the
//! whole cart total is discounted by `rate`.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of},
    orders::Order,
    promotions::DiscountStrategy,
};

/// Percentage off the cart total for customers with enough fidelity points.
#[derive(Debug, Clone, PartialEq)]
pub struct FidelityPromotion {
    min_points: u32,
    rate: Percentage,
}

impl FidelityPromotion {
    /// Create a new fidelity promotion.
    pub fn new(min_points: u32, rate: Percentage) -> Self {
        Self { min_points, rate }
    }

    /// Return the minimum number of fidelity points required.
    pub fn min_points(&self) -> u32 {
        self.min_points
    }

    /// Return the discount rate.
    pub fn rate(&self) -> &Percentage {
        &self.rate
    }
}

impl Default for FidelityPromotion {
    /// 5% off for customers with 1000 or more fidelity points.
    fn default() -> Self {
        Self::new(1000, Percentage::from(Decimal::new(5, 2)))
    }
}

impl DiscountStrategy for FidelityPromotion {
    fn discount<'a>(&self, order: &Order<'a>) -> Result<Money<'a, Currency>, DiscountError> {
        if order.customer().fidelity() >= self.min_points {
            percent_of(&self.rate, &order.total())
        } else {
            Ok(Money::from_minor(0, order.currency()))
        }
    }
}
