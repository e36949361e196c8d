//! Orders

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::trace;

use crate::{
    customers::Customer,
    discounts::DiscountError,
    items::LineItem,
    pricing::{PricingError, total_price},
    promotions::{DiscountStrategy, Promotion},
};

/// Errors related to order construction.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A line item's currency differs from the order currency (index, item currency, order currency).
    #[error("Line item {0} has currency {1}, but order has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// The cart total could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A customer's finalised cart, with an optional promotion applied at checkout.
///
/// The cart total is calculated once, when the order is created.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    customer: Customer,
    cart: Vec<LineItem<'a>>,
    promotion: Option<Promotion>,
    currency: &'static Currency,
    total: Money<'a, Currency>,
}

impl<'a> Order<'a> {
    /// Create a new order without a promotion.
    ///
    /// # Errors
    ///
    /// - [`OrderError::CurrencyMismatch`]: a line item is priced in another currency.
    /// - [`OrderError::Pricing`]: the cart total overflowed.
    pub fn new(
        customer: Customer,
        cart: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, OrderError> {
        let cart = cart.into();

        cart.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.price().currency();
            if item_currency == currency {
                Ok(())
            } else {
                Err(OrderError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        let total = total_price(&cart, currency)?;

        Ok(Order {
            customer,
            cart,
            promotion: None,
            currency,
            total,
        })
    }

    /// Apply a promotion to this order, replacing any existing one.
    #[must_use]
    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Get the customer who placed the order.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Get the line items in the cart.
    pub fn cart(&self) -> &[LineItem<'a>] {
        &self.cart
    }

    /// Get the promotion applied to the order, if any.
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Get the currency of the order.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the number of line items in the cart.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Count the unique products in the cart, ignoring quantities.
    pub fn distinct_products(&self) -> usize {
        self.cart
            .iter()
            .map(LineItem::product)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Cart total before any discount.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Discount granted by the applied promotion, or zero without one.
    ///
    /// The discount never exceeds the cart total.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the promotion cannot calculate its discount.
    pub fn discount(&self) -> Result<Money<'a, Currency>, DiscountError> {
        let Some(promotion) = &self.promotion else {
            return Ok(Money::from_minor(0, self.currency));
        };

        let discount = promotion.discount(self)?;
        let capped = discount
            .to_minor_units()
            .clamp(0, self.total.to_minor_units());

        trace!(
            customer = self.customer.name(),
            promotion = promotion.kind(),
            discount = capped,
            "promotion applied"
        );

        Ok(Money::from_minor(capped, self.currency))
    }

    /// Amount the customer owes after the discount.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be calculated.
    pub fn due(&self) -> Result<Money<'a, Currency>, DiscountError> {
        Ok(self.total.sub(self.discount()?)?)
    }
}

impl fmt::Display for Order<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let due = self.due().map_err(|_err| fmt::Error)?;

        write!(
            f,
            "<Order total: {:.2} due: {:.2}>",
            major_units(&self.total),
            major_units(&due)
        )
    }
}

/// Convert a money amount to a decimal in major units (e.g. 3500 cents -> 35.00).
fn major_units(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::promotions::{
        bulk_item::BulkItemPromotion, fidelity::FidelityPromotion, large_order::LargeOrderPromotion,
    };

    use super::*;

    fn cart<'a>() -> Result<Vec<LineItem<'a>>, crate::items::LineItemError> {
        Ok(vec![
            LineItem::new("banana", 4, Money::from_minor(50, USD))?,
            LineItem::new("apple", 10, Money::from_minor(150, USD))?,
            LineItem::new("watermelon", 5, Money::from_minor(500, USD))?,
        ])
    }

    #[test]
    fn total_sums_the_cart() -> TestResult {
        let order = Order::new(Customer::new("John Doe", 0), cart()?, USD)?;

        assert_eq!(order.total(), Money::from_minor(4200, USD));

        Ok(())
    }

    #[test]
    fn new_rejects_currency_mismatch() -> TestResult {
        let items = vec![
            LineItem::new("tea", 1, Money::from_minor(100, GBP))?,
            LineItem::new("coffee", 1, Money::from_minor(100, USD))?,
        ];

        let result = Order::new(Customer::new("Ann Smith", 0), items, GBP);

        match result {
            Err(OrderError::CurrencyMismatch(idx, item_currency, order_currency)) => {
                assert_eq!(idx, 1);
                assert_eq!(item_currency, USD.iso_alpha_code);
                assert_eq!(order_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn no_promotion_means_no_discount() -> TestResult {
        let order = Order::new(Customer::new("John Doe", 5000), cart()?, USD)?;

        assert!(order.promotion().is_none());
        assert_eq!(order.discount()?, Money::from_minor(0, USD));
        assert_eq!(order.due()?, order.total());

        Ok(())
    }

    #[test]
    fn fidelity_customer_pays_less() -> TestResult {
        let order = Order::new(Customer::new("Ann Smith", 1100), cart()?, USD)?
            .with_promotion(Promotion::Fidelity(FidelityPromotion::default()));

        assert_eq!(order.discount()?, Money::from_minor(210, USD));
        assert_eq!(order.due()?, Money::from_minor(3990, USD));

        Ok(())
    }

    #[test]
    fn with_promotion_replaces_existing_promotion() -> TestResult {
        let order = Order::new(Customer::new("Ann Smith", 1100), cart()?, USD)?
            .with_promotion(Promotion::Fidelity(FidelityPromotion::default()))
            .with_promotion(Promotion::LargeOrder(LargeOrderPromotion::default()));

        assert!(matches!(order.promotion(), Some(Promotion::LargeOrder(_))));
        assert_eq!(order.discount()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn discount_is_capped_at_total() -> TestResult {
        let generous = BulkItemPromotion::new(1, decimal_percentage::Percentage::from(2.0));
        let order = Order::new(Customer::new("John Doe", 0), cart()?, USD)?
            .with_promotion(Promotion::BulkItem(generous));

        assert_eq!(order.discount()?, order.total());
        assert_eq!(order.due()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn distinct_products_ignores_repeats_and_quantities() -> TestResult {
        let items = vec![
            LineItem::new("banana", 4, Money::from_minor(50, USD))?,
            LineItem::new("banana", 30, Money::from_minor(50, USD))?,
            LineItem::new("apple", 1, Money::from_minor(150, USD))?,
        ];

        let order = Order::new(Customer::new("John Doe", 0), items, USD)?;

        assert_eq!(order.len(), 3);
        assert_eq!(order.distinct_products(), 2);

        Ok(())
    }

    #[test]
    fn empty_order_totals_zero() -> TestResult {
        let order = Order::new(Customer::new("John Doe", 0), Vec::<LineItem<'_>>::new(), GBP)?;

        assert!(order.is_empty());
        assert_eq!(order.total(), Money::from_minor(0, GBP));
        assert_eq!(order.due()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn display_formats_two_decimal_places() -> TestResult {
        let order = Order::new(Customer::new("Ann Smith", 1100), cart()?, USD)?
            .with_promotion(Promotion::Fidelity(FidelityPromotion::default()));

        assert_eq!(order.to_string(), "<Order total: 42.00 due: 39.90>");

        Ok(())
    }
}
