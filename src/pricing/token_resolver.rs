use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::{One, Zero};
use std::sync::Arc;

use crate::{
    config::PricingConfig,
    db::PoolRegistry,
    error::PricingError,
    utils::normalize_address,
};

/// Derives a token's price in base-currency units.
///
/// Walks the whitelist in configured order and prices the token through the
/// first anchor it is paired with whose pool clears the minimum-liquidity
/// threshold. Only one hop is attempted, and the first qualifying anchor wins
/// even if a later anchor's pool is deeper, so whitelist order is part of the
/// pricing policy.
///
/// The counter-side token's `derived_base_price` is read as-is: anchors must
/// be priced before the tokens that depend on them (see
/// [`PricingPass::reprice_tokens`](super::PricingPass::reprice_tokens)).
pub struct TokenPriceResolver {
    config: Arc<PricingConfig>,
}

impl TokenPriceResolver {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Price of `token` in base currency, or 0 when no anchor qualifies.
    ///
    /// Fails only when a qualifying pool references a counter-side token that
    /// the registry does not know, which means the pool and token stores
    /// disagree.
    pub fn find_base_price_per_token<R: PoolRegistry + ?Sized>(
        &self,
        registry: &R,
        token: &str,
    ) -> Result<BigDecimal, PricingError> {
        let token = normalize_address(token);

        if self.config.is_base_token(&token) {
            return Ok(BigDecimal::one());
        }

        for anchor in self.config.whitelist() {
            if *anchor == token {
                continue;
            }

            let Some(pool_address) = registry.find_pool(&token, anchor) else {
                continue;
            };

            let Some(pool) = registry.load_pool(&pool_address) else {
                warn!(
                    "Pair lookup for {}/{} returned {} but no pool record exists",
                    token, anchor, pool_address
                );
                continue;
            };

            let Some(side) = pool.side_of(&token) else {
                warn!(
                    "Pool {} returned for {}/{} does not contain {}",
                    pool.address, token, anchor, token
                );
                continue;
            };

            if pool.reserve_base <= *self.config.minimum_liquidity_threshold() {
                continue;
            }

            let counter_address = pool.token(side.other());
            let counter = registry.load_token(counter_address).ok_or_else(|| {
                PricingError::MissingToken {
                    token: counter_address.to_string(),
                    pool: pool.address.clone(),
                }
            })?;

            // counter per token * base per counter
            let price = pool.price_of(side) * &counter.derived_base_price;

            debug!(
                "Priced {} via anchor {} in pool {}: {}",
                token, anchor, pool.address, price
            );

            return Ok(price);
        }

        Ok(BigDecimal::zero())
    }
}
