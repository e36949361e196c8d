//! Order Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    customers::Customer,
    fixtures::FixtureError,
    items::LineItem,
    promotions::{
        Promotion, bulk_item::BulkItemPromotion, fidelity::FidelityPromotion,
        large_order::LargeOrderPromotion,
    },
};

/// Order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Customer placing the order
    pub customer: Customer,

    /// Lines in the cart
    pub items: Vec<LineItemFixture>,

    /// Promotions available at checkout, in registration order
    #[serde(default)]
    pub promotions: Vec<PromotionFixture>,
}

/// Line item fixture
#[derive(Debug, Deserialize)]
pub struct LineItemFixture {
    /// Product identifier
    pub product: String,

    /// Number of units
    pub quantity: u32,

    /// Unit price (e.g., "2.99 GBP")
    pub price: String,
}

impl TryFrom<LineItemFixture> for LineItem<'static> {
    type Error = FixtureError;

    fn try_from(fixture: LineItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(LineItem::new(
            fixture.product,
            fixture.quantity,
            Money::from_minor(minor_units, currency),
        )?)
    }
}

/// Promotion fixture from YAML
///
/// Thresholds and rates are optional; omitted values fall back to each promotion's defaults.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Fidelity promotion
    Fidelity {
        /// Promotion name
        name: String,

        /// Minimum fidelity points
        min_points: Option<u32>,

        /// Discount rate (e.g., "5%")
        rate: Option<String>,
    },

    /// Bulk item promotion
    BulkItem {
        /// Promotion name
        name: String,

        /// Minimum units per line
        min_quantity: Option<u32>,

        /// Discount rate (e.g., "10%")
        rate: Option<String>,
    },

    /// Large order promotion
    LargeOrder {
        /// Promotion name
        name: String,

        /// Minimum distinct products
        min_distinct_items: Option<usize>,

        /// Discount rate (e.g., "7%")
        rate: Option<String>,
    },
}

impl PromotionFixture {
    /// Convert to a promotion name and `Promotion`
    ///
    /// # Errors
    ///
    /// Returns an error if the rate cannot be parsed.
    pub fn try_into_promotion(self) -> Result<(String, Promotion), FixtureError> {
        match self {
            PromotionFixture::Fidelity {
                name,
                min_points,
                rate,
            } => {
                let defaults = FidelityPromotion::default();
                let promotion = FidelityPromotion::new(
                    min_points.unwrap_or(defaults.min_points()),
                    rate_or(rate.as_deref(), defaults.rate())?,
                );

                Ok((name, promotion.into()))
            }
            PromotionFixture::BulkItem {
                name,
                min_quantity,
                rate,
            } => {
                let defaults = BulkItemPromotion::default();
                let promotion = BulkItemPromotion::new(
                    min_quantity.unwrap_or(defaults.min_quantity()),
                    rate_or(rate.as_deref(), defaults.rate())?,
                );

                Ok((name, promotion.into()))
            }
            PromotionFixture::LargeOrder {
                name,
                min_distinct_items,
                rate,
            } => {
                let defaults = LargeOrderPromotion::default();
                let promotion = LargeOrderPromotion::new(
                    min_distinct_items.unwrap_or(defaults.min_distinct_items()),
                    rate_or(rate.as_deref(), defaults.rate())?,
                );

                Ok((name, promotion.into()))
            }
        }
    }
}

fn rate_or(rate: Option<&str>, default: &Percentage) -> Result<Percentage, FixtureError> {
    rate.map_or(Ok(*default), parse_percentage)
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a decimal.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map(|points| points / Decimal::ONE_HUNDRED)
    } else {
        trimmed.parse::<Decimal>()
    };

    value
        .map(Percentage::from)
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
