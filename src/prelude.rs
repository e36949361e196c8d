//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    customers::Customer,
    discounts::DiscountError,
    fixtures::{Fixture, FixtureError, PromotionChoice},
    items::{LineItem, LineItemError},
    orders::{Order, OrderError},
    pricing::PricingError,
    promotions::{
        DiscountStrategy, Promotion, PromotionKey, PromotionMeta, best_discount,
        bulk_item::BulkItemPromotion,
        fidelity::FidelityPromotion,
        large_order::LargeOrderPromotion,
        registry::{BestPromotion, PromotionRegistry},
    },
    receipt::{Receipt, ReceiptError},
};
