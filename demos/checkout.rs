//! Checkout Example
//!
//! Loads an order fixture, applies a promotion and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to choose the promotion: `none`, `best`, or a promotion name from the fixture
//! Set `RUST_LOG=checkout=debug` to see each promotion being evaluated

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkout::{fixtures::Fixture, receipt::Receipt, utils::CheckoutArgs};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CheckoutArgs::parse();

    let fixture = Fixture::load(&args.base_path, &args.fixture)?;
    let (order, key) = fixture.order_with(&args.promotion)?;

    let promotion_name = key
        .and_then(|key| fixture.registry().meta(key))
        .map(|meta| meta.name.as_str());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_order(&order, promotion_name)?.write_to(&mut handle)?;

    println!("{order}");

    Ok(())
}
