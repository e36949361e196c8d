//! Promotion Registry
//!
//! An ordered collection of named promotions. Registration order is significant: when two
//! promotions give the same discount, the one registered first wins.

use rusty_money::{Money, iso::Currency};
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    discounts::DiscountError,
    orders::Order,
    promotions::{
        DiscountStrategy, Promotion, PromotionKey, PromotionMeta, best_discount,
        bulk_item::BulkItemPromotion, fidelity::FidelityPromotion,
        large_order::LargeOrderPromotion,
    },
};

/// The promotion that gives an order its largest discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPromotion<'a> {
    /// Key of the winning promotion in the registry
    pub key: PromotionKey,

    /// Discount the promotion grants
    pub discount: Money<'a, Currency>,
}

/// Registered promotions, in registration order.
#[derive(Debug, Default, Clone)]
pub struct PromotionRegistry {
    promotions: SlotMap<PromotionKey, Promotion>,
    meta: SecondaryMap<PromotionKey, PromotionMeta>,
    order: SmallVec<[PromotionKey; 4]>,
}

impl PromotionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the fidelity, bulk item and large order promotions with their
    /// default thresholds, in that order.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("fidelity", FidelityPromotion::default());
        registry.register("bulk_item", BulkItemPromotion::default());
        registry.register("large_order", LargeOrderPromotion::default());

        registry
    }

    /// Add a promotion under the given display name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        promotion: impl Into<Promotion>,
    ) -> PromotionKey {
        let key = self.promotions.insert(promotion.into());

        self.meta.insert(key, PromotionMeta { name: name.into() });
        self.order.push(key);

        key
    }

    /// Get a promotion by key.
    pub fn get(&self, key: PromotionKey) -> Option<&Promotion> {
        self.promotions.get(key)
    }

    /// Get promotion metadata by key.
    pub fn meta(&self, key: PromotionKey) -> Option<&PromotionMeta> {
        self.meta.get(key)
    }

    /// Find the first promotion registered under `name`.
    pub fn find(&self, name: &str) -> Option<PromotionKey> {
        self.order
            .iter()
            .copied()
            .find(|key| self.meta.get(*key).is_some_and(|meta| meta.name == name))
    }

    /// Iterate over promotions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PromotionKey, &Promotion)> {
        self.order
            .iter()
            .filter_map(|key| self.promotions.get(*key).map(|promotion| (*key, promotion)))
    }

    /// Number of registered promotions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no promotions are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The largest discount any registered promotion gives the order.
    ///
    /// # Errors
    ///
    /// Returns the first [`DiscountError`] raised by a promotion.
    pub fn best_discount<'a>(
        &self,
        order: &Order<'a>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        best_discount(self.iter().map(|(_key, promotion)| promotion), order)
    }

    /// The promotion giving the order its largest discount.
    ///
    /// Returns `None` when the registry is empty. Ties go to the earliest registered promotion.
    ///
    /// # Errors
    ///
    /// Returns the first [`DiscountError`] raised by a promotion.
    pub fn best_promotion<'a>(
        &self,
        order: &Order<'a>,
    ) -> Result<Option<BestPromotion<'a>>, DiscountError> {
        let mut best: Option<BestPromotion<'a>> = None;

        for (key, promotion) in self.iter() {
            let discount = promotion.discount(order)?;

            debug!(
                promotion = self.meta(key).map_or("", |meta| meta.name.as_str()),
                discount = discount.to_minor_units(),
                "evaluated promotion"
            );

            let is_better = best
                .as_ref()
                .is_none_or(|current| discount.to_minor_units() > current.discount.to_minor_units());

            if is_better {
                best = Some(BestPromotion { key, discount });
            }
        }

        Ok(best)
    }

    /// Return the order with its best promotion applied, or unchanged if none are registered.
    ///
    /// # Errors
    ///
    /// Returns the first [`DiscountError`] raised by a promotion.
    pub fn apply_best<'a>(&self, order: Order<'a>) -> Result<Order<'a>, DiscountError> {
        let Some(best) = self.best_promotion(&order)? else {
            return Ok(order);
        };

        match self.get(best.key) {
            Some(promotion) => Ok(order.with_promotion(promotion.clone())),
            None => Ok(order),
        }
    }
}
