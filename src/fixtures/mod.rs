//! Fixtures
//!
//! Orders described in YAML files under `<base path>/orders/<name>.yml`:
//!
//! ```yaml
//! customer:
//!   name: Ann Smith
//!   fidelity: 1100
//! items:
//!   - product: banana
//!     quantity: 4
//!     price: 0.50 USD
//! promotions:
//!   - type: fidelity
//!     name: Loyalty
//!     rate: 5%
//! ```

use std::{
    convert::Infallible,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    customers::Customer,
    discounts::DiscountError,
    fixtures::orders::OrderFixture,
    items::{LineItem, LineItemError},
    orders::{Order, OrderError},
    promotions::{PromotionKey, registry::PromotionRegistry},
};

pub mod orders;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Promotion not found
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Currency mismatch between line items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No line items in the fixture
    #[error("No items loaded; cannot determine currency")]
    NoItems,

    /// Invalid line item
    #[error("Invalid line item: {0}")]
    LineItem(#[from] LineItemError),

    /// Order creation error
    #[error("Failed to create order: {0}")]
    Order(#[from] OrderError),

    /// Promotion evaluation error
    #[error("Failed to evaluate promotions: {0}")]
    Discount(#[from] DiscountError),
}

/// Which promotion to apply when building an order from a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionChoice {
    /// Check out without a promotion
    None,

    /// Apply whichever registered promotion gives the largest discount
    Best,

    /// Apply the promotion registered under this name
    Named(String),
}

impl FromStr for PromotionChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => PromotionChoice::None,
            "best" => PromotionChoice::Best,
            name => PromotionChoice::Named(name.to_string()),
        })
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    customer: Customer,
    items: Vec<LineItem<'static>>,
    registry: PromotionRegistry,
    currency: &'static Currency,
}

impl Fixture {
    /// Load an order fixture by name from `./fixtures`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it describes an invalid order.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::load(PathBuf::from("./fixtures"), name)
    }

    /// Load an order fixture by name from a custom base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it describes an invalid order.
    pub fn load(base_path: impl AsRef<Path>, name: &str) -> Result<Self, FixtureError> {
        let file_path = base_path
            .as_ref()
            .join("orders")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;

        Self::from_yaml(&contents)
    }

    /// Build a fixture from YAML source.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or if it describes an invalid order.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: OrderFixture = serde_norway::from_str(contents)?;

        let items = fixture
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = items
            .first()
            .map(|item| item.price().currency())
            .ok_or(FixtureError::NoItems)?;

        if let Some(other) = items
            .iter()
            .map(|item| item.price().currency())
            .find(|item_currency| *item_currency != currency)
        {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                other.iso_alpha_code.to_string(),
            ));
        }

        let mut registry = PromotionRegistry::new();

        for promotion_fixture in fixture.promotions {
            let (name, promotion) = promotion_fixture.try_into_promotion()?;

            registry.register(name, promotion);
        }

        Ok(Self {
            customer: fixture.customer,
            items,
            registry,
            currency,
        })
    }

    /// Get the customer
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Get all line items
    pub fn items(&self) -> &[LineItem<'static>] {
        &self.items
    }

    /// Get the promotions registered by the fixture
    pub fn registry(&self) -> &PromotionRegistry {
        &self.registry
    }

    /// Get the currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Create an order from the fixture without a promotion
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be created.
    pub fn order(&self) -> Result<Order<'static>, FixtureError> {
        Ok(Order::new(
            self.customer.clone(),
            self.items.clone(),
            self.currency,
        )?)
    }

    /// Create an order with the chosen promotion applied.
    ///
    /// Also returns the key of the applied promotion, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be created, a named promotion is not registered, or
    /// the promotions cannot be evaluated.
    pub fn order_with(
        &self,
        choice: &PromotionChoice,
    ) -> Result<(Order<'static>, Option<PromotionKey>), FixtureError> {
        let order = self.order()?;

        let key = match choice {
            PromotionChoice::None => None,
            PromotionChoice::Best => self
                .registry
                .best_promotion(&order)?
                .map(|best| best.key),
            PromotionChoice::Named(name) => Some(
                self.registry
                    .find(name)
                    .ok_or_else(|| FixtureError::PromotionNotFound(name.clone()))?,
            ),
        };

        match key.and_then(|key| self.registry.get(key)) {
            Some(promotion) => Ok((order.with_promotion(promotion.clone()), key)),
            None => Ok((order, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::{Money, iso::USD};
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::promotions::Promotion;

    use super::*;

    const ORDER: &str = "
customer:
  name: Ann Smith
  fidelity: 1100
items:
  - product: banana
    quantity: 30
    price: 0.50 USD
  - product: apple
    quantity: 10
    price: 1.50 USD
promotions:
  - type: fidelity
    name: Loyalty
  - type: bulk_item
    name: Bulk
  - type: large_order
    name: Large
";

    #[test]
    fn from_yaml_builds_items_and_registry() -> TestResult {
        let fixture = Fixture::from_yaml(ORDER)?;

        assert_eq!(fixture.customer(), &Customer::new("Ann Smith", 1100));
        assert_eq!(fixture.items().len(), 2);
        assert_eq!(fixture.currency(), USD);
        assert_eq!(fixture.registry().len(), 3);

        Ok(())
    }

    #[test]
    fn load_reads_from_orders_directory() -> TestResult {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("orders"))?;
        fs::write(dir.path().join("orders").join("ann.yml"), ORDER)?;

        let fixture = Fixture::load(dir.path(), "ann")?;

        assert_eq!(fixture.order()?.total(), Money::from_minor(3000, USD));

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() -> TestResult {
        let dir = tempdir()?;

        let result = Fixture::load(dir.path(), "missing");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn order_with_best_applies_largest_discount() -> TestResult {
        let fixture = Fixture::from_yaml(ORDER)?;

        // Fidelity and bulk both give 1.50; the first registered wins the tie.
        let (order, key) = fixture.order_with(&PromotionChoice::Best)?;

        assert_eq!(key, fixture.registry().find("Loyalty"));
        assert!(matches!(order.promotion(), Some(Promotion::Fidelity(_))));
        assert_eq!(order.due()?, Money::from_minor(2850, USD));

        Ok(())
    }

    #[test]
    fn order_with_named_promotion() -> TestResult {
        let fixture = Fixture::from_yaml(ORDER)?;

        let (order, key) = fixture.order_with(&PromotionChoice::Named("Large".to_string()))?;

        assert_eq!(key, fixture.registry().find("Large"));
        assert_eq!(order.discount()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn order_with_unknown_promotion_errors() -> TestResult {
        let fixture = Fixture::from_yaml(ORDER)?;

        let result = fixture.order_with(&PromotionChoice::Named("Clearance".to_string()));

        assert!(matches!(
            result,
            Err(FixtureError::PromotionNotFound(name)) if name == "Clearance"
        ));

        Ok(())
    }

    #[test]
    fn order_with_none_has_no_promotion() -> TestResult {
        let fixture = Fixture::from_yaml(ORDER)?;

        let (order, key) = fixture.order_with(&PromotionChoice::None)?;

        assert_eq!(key, None);
        assert!(order.promotion().is_none());

        Ok(())
    }

    #[test]
    fn from_yaml_rejects_mixed_currencies() {
        let yaml = "
customer: { name: John Doe, fidelity: 0 }
items:
  - { product: tea, quantity: 1, price: 1.00 GBP }
  - { product: coffee, quantity: 1, price: 1.00 USD }
";

        let result = Fixture::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "GBP" && found == "USD"
        ));
    }

    #[test]
    fn from_yaml_rejects_empty_cart() {
        let yaml = "customer: { name: John Doe, fidelity: 0 }\nitems: []\n";

        assert!(matches!(Fixture::from_yaml(yaml), Err(FixtureError::NoItems)));
    }

    #[test]
    fn from_yaml_rejects_zero_quantity() {
        let yaml = "
customer: { name: John Doe, fidelity: 0 }
items:
  - { product: tea, quantity: 0, price: 1.00 GBP }
";

        assert!(matches!(
            Fixture::from_yaml(yaml),
            Err(FixtureError::LineItem(LineItemError::ZeroQuantity(_)))
        ));
    }

    #[test]
    fn promotion_choice_parses_keywords_and_names() {
        assert_eq!("none".parse::<PromotionChoice>(), Ok(PromotionChoice::None));
        assert_eq!("best".parse::<PromotionChoice>(), Ok(PromotionChoice::Best));
        assert_eq!(
            "Loyalty".parse::<PromotionChoice>(),
            Ok(PromotionChoice::Named("Loyalty".to_string()))
        );
    }
}
