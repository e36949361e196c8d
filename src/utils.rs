//! Utils

use clap::Parser;

use crate::fixtures::PromotionChoice;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutArgs {
    /// Fixture set to load the order from
    #[clap(short, long, default_value = "standard")]
    pub fixture: String,

    /// Directory containing the `orders/` fixture folder
    #[clap(short, long, default_value = "./fixtures")]
    pub base_path: String,

    /// Promotion to apply: `none`, `best`, or the name of a registered promotion
    #[clap(short, long, default_value = "best")]
    pub promotion: PromotionChoice,
}
