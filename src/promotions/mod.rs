//! Promotions
//!
//! A promotion is a discount strategy: given an [`Order`], it returns the amount to take off the
//! cart total. Each variant of [`Promotion`] is configured with its own thresholds and rates,
//! and custom strategies can be written by implementing [`DiscountStrategy`].

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use tracing::trace;

use crate::{
    discounts::DiscountError,
    orders::Order,
    promotions::{
        bulk_item::BulkItemPromotion, fidelity::FidelityPromotion,
        large_order::LargeOrderPromotion,
    },
};

pub mod bulk_item;
pub mod fidelity;
pub mod large_order;
pub mod registry;

new_key_type! {
    /// Promotion Key
    pub struct PromotionKey;
}

/// Promotion metadata
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PromotionMeta {
    /// Promotion name
    pub name: String,
}

/// A policy that maps an order to a discount.
pub trait DiscountStrategy {
    /// Return the discount as a non-negative amount in the order's currency.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be represented in minor units.
    fn discount<'a>(&self, order: &Order<'a>) -> Result<Money<'a, Currency>, DiscountError>;
}

/// Promotion enum
#[derive(Debug, Clone, PartialEq)]
pub enum Promotion {
    /// Percentage off for customers with enough fidelity points
    Fidelity(FidelityPromotion),

    /// Percentage off each line bought in bulk
    BulkItem(BulkItemPromotion),

    /// Percentage off orders with many distinct products
    LargeOrder(LargeOrderPromotion),
}

impl Promotion {
    /// Return the machine name of the promotion variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Promotion::Fidelity(_) => "fidelity",
            Promotion::BulkItem(_) => "bulk_item",
            Promotion::LargeOrder(_) => "large_order",
        }
    }
}

impl DiscountStrategy for Promotion {
    fn discount<'a>(&self, order: &Order<'a>) -> Result<Money<'a, Currency>, DiscountError> {
        match self {
            Promotion::Fidelity(fidelity) => fidelity.discount(order),
            Promotion::BulkItem(bulk_item) => bulk_item.discount(order),
            Promotion::LargeOrder(large_order) => large_order.discount(order),
        }
    }
}

impl From<FidelityPromotion> for Promotion {
    fn from(promotion: FidelityPromotion) -> Self {
        Promotion::Fidelity(promotion)
    }
}

impl From<BulkItemPromotion> for Promotion {
    fn from(promotion: BulkItemPromotion) -> Self {
        Promotion::BulkItem(promotion)
    }
}

impl From<LargeOrderPromotion> for Promotion {
    fn from(promotion: LargeOrderPromotion) -> Self {
        Promotion::LargeOrder(promotion)
    }
}

/// Evaluate every strategy against the order and return the largest discount.
///
/// Returns zero in the order's currency when no strategies are given.
///
/// # Errors
///
/// Returns the first [`DiscountError`] raised by a strategy.
pub fn best_discount<'a, 'p, S>(
    promotions: impl IntoIterator<Item = &'p S>,
    order: &Order<'a>,
) -> Result<Money<'a, Currency>, DiscountError>
where
    S: DiscountStrategy + ?Sized + 'p,
{
    promotions.into_iter().try_fold(
        Money::from_minor(0, order.currency()),
        |best, promotion| -> Result<_, DiscountError> {
            let discount = promotion.discount(order)?;

            trace!(discount = discount.to_minor_units(), "evaluated promotion");

            if discount.to_minor_units() > best.to_minor_units() {
                Ok(discount)
            } else {
                Ok(best)
            }
        },
    )
}
