//! Checkout
//!
//! Orders, line items and interchangeable promotion strategies for computing the amount a
//! customer owes at checkout.

pub mod customers;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod receipt;
pub mod utils;
