use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::{normalize_address, safe_div};

/// One side of a two-token pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolSide {
    A,
    B,
}

impl PoolSide {
    pub fn other(self) -> Self {
        match self {
            PoolSide::A => PoolSide::B,
            PoolSide::B => PoolSide::A,
        }
    }
}

/// Two-token liquidity pool (pair) record.
///
/// Reserves are maintained by the ingestion layer. The pricing subsystem only
/// reads them and writes the derived fields below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pool {
    pub address: String,
    pub token_a: String,
    pub token_b: String,

    #[serde(default)]
    pub reserve_a: BigDecimal,
    #[serde(default)]
    pub reserve_b: BigDecimal,

    // Computed prices
    // price_a_in_b = token_b per token_a (reserve_b / reserve_a)
    // price_b_in_a = token_a per token_b (reserve_a / reserve_b)
    #[serde(default)]
    pub price_a_in_b: BigDecimal,
    #[serde(default)]
    pub price_b_in_a: BigDecimal,

    /// Total liquidity in base-currency units, both sides summed.
    #[serde(default)]
    pub reserve_base: BigDecimal,
    #[serde(default)]
    pub reserve_usd: BigDecimal,
    /// Whitelist-tracked liquidity in base-currency units.
    #[serde(default)]
    pub tracked_reserve_base: BigDecimal,
}

impl Pool {
    pub fn new(
        address: &str,
        token_a: &str,
        token_b: &str,
        reserve_a: BigDecimal,
        reserve_b: BigDecimal,
    ) -> Self {
        let mut pool = Self {
            address: normalize_address(address),
            token_a: normalize_address(token_a),
            token_b: normalize_address(token_b),
            reserve_a,
            reserve_b,
            price_a_in_b: BigDecimal::default(),
            price_b_in_a: BigDecimal::default(),
            reserve_base: BigDecimal::default(),
            reserve_usd: BigDecimal::default(),
            tracked_reserve_base: BigDecimal::default(),
        };
        pool.sync_prices();
        pool
    }

    #[cfg(test)]
    pub fn with_reserve_base(mut self, reserve_base: BigDecimal) -> Self {
        self.reserve_base = reserve_base;
        self
    }

    /// Recompute both directional prices from the current reserves.
    ///
    /// An empty side yields a zero price rather than a division fault.
    pub fn sync_prices(&mut self) {
        self.price_a_in_b = safe_div(&self.reserve_b, &self.reserve_a);
        self.price_b_in_a = safe_div(&self.reserve_a, &self.reserve_b);
    }

    /// Set `reserve_base` from each side's derived base price.
    pub fn update_reserve_base(&mut self, derived_a: &BigDecimal, derived_b: &BigDecimal) {
        self.reserve_base = &self.reserve_a * derived_a + &self.reserve_b * derived_b;
    }

    pub fn side_of(&self, token: &str) -> Option<PoolSide> {
        let token = normalize_address(token);
        if self.token_a == token {
            Some(PoolSide::A)
        } else if self.token_b == token {
            Some(PoolSide::B)
        } else {
            None
        }
    }

    pub fn token(&self, side: PoolSide) -> &str {
        match side {
            PoolSide::A => &self.token_a,
            PoolSide::B => &self.token_b,
        }
    }

    pub fn reserve_of(&self, side: PoolSide) -> &BigDecimal {
        match side {
            PoolSide::A => &self.reserve_a,
            PoolSide::B => &self.reserve_b,
        }
    }

    /// Price of the token on `side`, expressed in the counter-side token.
    pub fn price_of(&self, side: PoolSide) -> &BigDecimal {
        match side {
            PoolSide::A => &self.price_a_in_b,
            PoolSide::B => &self.price_b_in_a,
        }
    }
}
