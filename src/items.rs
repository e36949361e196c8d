//! Items

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::PricingError;

/// Errors raised when a line item is constructed from invalid values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// A line item must contain at least one unit of its product.
    #[error("line item for {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// Unit prices cannot be negative.
    #[error("line item for {0} has a negative unit price")]
    NegativePrice(String),
}

/// A product, the number of units ordered and the price of a single unit.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    product: String,
    quantity: u32,
    price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::ZeroQuantity`]: `quantity` is zero.
    /// - [`LineItemError::NegativePrice`]: `price` is below zero.
    pub fn new(
        product: impl Into<String>,
        quantity: u32,
        price: Money<'a, Currency>,
    ) -> Result<Self, LineItemError> {
        let product = product.into();

        if quantity == 0 {
            return Err(LineItemError::ZeroQuantity(product));
        }

        if price.to_minor_units() < 0 {
            return Err(LineItemError::NegativePrice(product));
        }

        Ok(Self {
            product,
            quantity,
            price,
        })
    }

    /// Returns the product identifier
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the price of every unit on this line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(minor, self.price.currency()))
    }
}
