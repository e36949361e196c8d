//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{discounts::DiscountError, orders::Order, pricing::PricingError};

/// Errors that can occur when building a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line total.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error calculating the order discount.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A single printed line of the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product identifier
    pub product: String,

    /// Units bought
    pub quantity: u32,

    /// Price of a single unit
    pub unit_price: Money<'a, Currency>,

    /// Price of every unit on the line
    pub total: Money<'a, Currency>,
}

/// Final receipt for a checked-out order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    customer: String,
    lines: SmallVec<[ReceiptLine<'a>; 10]>,
    promotion: Option<String>,

    /// Total cost before any discount
    subtotal: Money<'a, Currency>,

    /// Amount taken off by the promotion
    discount: Money<'a, Currency>,

    /// Amount due after the discount
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from an order.
    ///
    /// `promotion` is the display name of the applied promotion, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line total or the discount cannot be calculated.
    pub fn from_order(order: &Order<'a>, promotion: Option<&str>) -> Result<Self, ReceiptError> {
        let lines = order
            .cart()
            .iter()
            .map(|item| -> Result<_, ReceiptError> {
                Ok(ReceiptLine {
                    product: item.product().to_string(),
                    quantity: item.quantity(),
                    unit_price: *item.price(),
                    total: item.total()?,
                })
            })
            .collect::<Result<SmallVec<_>, _>>()?;

        let promotion = order
            .promotion()
            .map(|applied| promotion.unwrap_or(applied.kind()).to_string());

        Ok(Receipt {
            customer: order.customer().name().to_string(),
            lines,
            promotion,
            subtotal: order.total(),
            discount: order.discount()?,
            total: order.due()?,
        })
    }

    /// Lines in the order they appear in the cart
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Name of the applied promotion
    pub fn promotion(&self) -> Option<&str> {
        self.promotion.as_deref()
    }

    /// Total cost before any discount
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount taken off by the promotion
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount due
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Calculates the discount as a percentage of the subtotal
    pub fn savings_percent(&self) -> Percentage {
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(
            Decimal::from(self.discount.to_minor_units()) / Decimal::from(subtotal_minor),
        )
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.product.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n Customer: {}\n{table}", self.customer).map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let savings_points = percent_points(self.savings_percent());

        let promotion = self
            .promotion
            .as_deref()
            .map_or_else(String::new, |name| format!(" {name}"));

        let rows = [
            (" Subtotal:", self.subtotal.to_string()),
            (" Discount:", format!("({savings_points:.2}%) {}", self.discount)),
            (" Total:", self.total.to_string()),
        ];

        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, "{label:<11}{value:>value_width$}").map_err(|_err| ReceiptError::IO)?;
        }

        if !promotion.is_empty() {
            writeln!(out, " Promotion:{promotion}").map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        customers::Customer,
        items::LineItem,
        promotions::{Promotion, fidelity::FidelityPromotion},
    };

    use super::*;

    fn order<'a>(fidelity: u32) -> TestResult<Order<'a>> {
        let cart = vec![
            LineItem::new("banana", 4, Money::from_minor(50, USD))?,
            LineItem::new("apple", 10, Money::from_minor(150, USD))?,
            LineItem::new("watermelon", 5, Money::from_minor(500, USD))?,
        ];

        Ok(Order::new(Customer::new("Ann Smith", fidelity), cart, USD)?)
    }

    #[test]
    fn from_order_copies_lines_and_totals() -> TestResult {
        let order = order(1100)?.with_promotion(Promotion::Fidelity(FidelityPromotion::default()));

        let receipt = Receipt::from_order(&order, Some("Loyalty"))?;

        assert_eq!(receipt.lines().len(), 3);
        assert_eq!(receipt.subtotal(), Money::from_minor(4200, USD));
        assert_eq!(receipt.discount(), Money::from_minor(210, USD));
        assert_eq!(receipt.total(), Money::from_minor(3990, USD));
        assert_eq!(receipt.promotion(), Some("Loyalty"));

        let watermelon = receipt.lines().get(2).ok_or("missing watermelon line")?;
        assert_eq!(watermelon.total, Money::from_minor(2500, USD));

        Ok(())
    }

    #[test]
    fn promotion_name_falls_back_to_kind() -> TestResult {
        let order = order(1100)?.with_promotion(Promotion::Fidelity(FidelityPromotion::default()));

        let receipt = Receipt::from_order(&order, None)?;

        assert_eq!(receipt.promotion(), Some("fidelity"));

        Ok(())
    }

    #[test]
    fn no_promotion_means_no_name() -> TestResult {
        let receipt = Receipt::from_order(&order(0)?, Some("Loyalty"))?;

        assert_eq!(receipt.promotion(), None);
        assert_eq!(receipt.total(), receipt.subtotal());

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_subtotal() -> TestResult {
        let order = order(1100)?.with_promotion(Promotion::Fidelity(FidelityPromotion::default()));

        let receipt = Receipt::from_order(&order, None)?;

        assert_eq!(percent_points(receipt.savings_percent()), Decimal::new(5, 0));

        Ok(())
    }

    #[test]
    fn write_to_renders_items_and_summary() -> TestResult {
        let order = order(1100)?.with_promotion(Promotion::Fidelity(FidelityPromotion::default()));
        let receipt = Receipt::from_order(&order, Some("Loyalty"))?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Ann Smith"));
        assert!(rendered.contains("watermelon"));
        assert!(rendered.contains("Subtotal:"));
        assert!(rendered.contains("Promotion: Loyalty"));
        assert!(rendered.contains("(5.00%)"));

        Ok(())
    }
}
