use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::normalize_address;

/// Token record as seen by the pricing subsystem.
///
/// `derived_base_price` is the token's price in base-currency units. It is
/// zero until the token has been priced at least once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub derived_base_price: BigDecimal,
}

impl Token {
    pub fn new(address: &str, symbol: &str) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            address: normalize_address(address),
            symbol: symbol.to_string(),
            derived_base_price: BigDecimal::default(),
        }
    }

    #[cfg(test)]
    pub fn with_derived_base_price(mut self, price: BigDecimal) -> Self {
        self.derived_base_price = price;
        self
    }
}
