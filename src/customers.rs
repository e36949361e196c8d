//! Customers

use serde::Deserialize;

/// A customer placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Customer {
    name: String,
    fidelity: u32,
}

impl Customer {
    /// Creates a new customer with the given loyalty point balance.
    pub fn new(name: impl Into<String>, fidelity: u32) -> Self {
        Self {
            name: name.into(),
            fidelity,
        }
    }

    /// Returns the customer's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the customer's fidelity points
    pub fn fidelity(&self) -> u32 {
        self.fidelity
    }
}
