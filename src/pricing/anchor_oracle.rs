use bigdecimal::BigDecimal;
use log::warn;
use num_traits::{One, Zero};
use std::sync::Arc;

use crate::{
    config::PricingConfig,
    db::PoolRegistry,
    utils::safe_div,
};

/// Base-currency side of one stablecoin pool.
struct StableQuote {
    /// Reserve held on the base-currency side
    base_reserve: BigDecimal,
    /// Base currency priced in the stablecoin
    base_price: BigDecimal,
}

/// USD price of the base currency.
///
/// Derived from the two configured stablecoin/base pools:
/// - both present: liquidity-weighted average of their implied prices
/// - one present: that pool's implied price
/// - none present, or no base liquidity at all: 0
pub struct AnchorPriceOracle {
    config: Arc<PricingConfig>,
}

impl AnchorPriceOracle {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    fn stable_quote<R: PoolRegistry + ?Sized>(
        &self,
        registry: &R,
        pool_address: &str,
    ) -> Option<StableQuote> {
        let pool = registry.load_pool(pool_address)?;

        let Some(base_side) = pool.side_of(self.config.base_token()) else {
            warn!(
                "Stable pool {} does not contain base token {}, ignoring it",
                pool.address,
                self.config.base_token()
            );
            return None;
        };

        Some(StableQuote {
            base_reserve: pool.reserve_of(base_side).clone(),
            base_price: pool.price_of(base_side).clone(),
        })
    }

    pub fn base_price_in_usd<R: PoolRegistry + ?Sized>(&self, registry: &R) -> BigDecimal {
        let [primary, secondary] = self.config.stable_pools();

        match (
            self.stable_quote(registry, primary),
            self.stable_quote(registry, secondary),
        ) {
            (Some(first), Some(second)) => {
                let total = &first.base_reserve + &second.base_reserve;
                if total.is_zero() {
                    return BigDecimal::zero();
                }

                // second weight is the complement so the pair sums to exactly 1
                let first_weight = safe_div(&first.base_reserve, &total);
                let second_weight = BigDecimal::one() - &first_weight;

                first.base_price * first_weight + second.base_price * second_weight
            },
            (Some(only), None) | (None, Some(only)) => only.base_price,
            (None, None) => BigDecimal::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        models::{Pool, Token},
        MemoryRegistry,
    };
    use std::str::FromStr;

    const BASE: &str = "0xbase";
    const USDT: &str = "0xusdt";
    const USDC: &str = "0xusdc";
    const USDT_POOL: &str = "0xusdt_base";
    const USDC_POOL: &str = "0xusdc_base";

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn config() -> Arc<PricingConfig> {
        Arc::new(
            PricingConfig::new(BASE, [USDT, USDC], [USDT_POOL, USDC_POOL], BigDecimal::zero())
                .unwrap(),
        )
    }

    /// Stable pool with the stablecoin on side A and base on side B.
    fn stable_pool(address: &str, stable: &str, base_reserve: &str, base_price: &str) -> Pool {
        let base_reserve = dec(base_reserve);
        let stable_reserve = &base_reserve * dec(base_price);
        Pool::new(address, stable, BASE, stable_reserve, base_reserve)
    }

    fn registry_with(pools: Vec<Pool>) -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.insert_token(Token::new(BASE, "BASE"));
        for pool in pools {
            registry.insert_pool(pool);
        }
        registry
    }

    #[test]
    fn test_weighted_average_of_both_pools() {
        let registry = registry_with(vec![
            stable_pool(USDT_POOL, USDT, "600", "1.02"),
            stable_pool(USDC_POOL, USDC, "400", "0.98"),
        ]);

        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert_eq!(price, dec("1.004"));
    }

    #[test]
    fn test_weights_sum_to_one_for_uneven_split() {
        // 1/3 vs 2/3 split: equal prices must come back unchanged
        let registry = registry_with(vec![
            stable_pool(USDT_POOL, USDT, "100", "2"),
            stable_pool(USDC_POOL, USDC, "200", "2"),
        ]);

        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert_eq!(price, dec("2"));
    }

    #[test]
    fn test_single_pool_price_is_used_directly() {
        let registry = registry_with(vec![stable_pool(USDC_POOL, USDC, "400", "0.98")]);
        let oracle = AnchorPriceOracle::new(config());
        assert_eq!(oracle.base_price_in_usd(&registry), dec("0.98"));

        let registry = registry_with(vec![stable_pool(USDT_POOL, USDT, "600", "1.02")]);
        assert_eq!(oracle.base_price_in_usd(&registry), dec("1.02"));
    }

    #[test]
    fn test_no_pools_is_zero() {
        let registry = registry_with(vec![]);
        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert!(price.is_zero());
    }

    #[test]
    fn test_zero_combined_reserve_is_zero() {
        let registry = registry_with(vec![
            stable_pool(USDT_POOL, USDT, "0", "1"),
            stable_pool(USDC_POOL, USDC, "0", "1"),
        ]);

        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert!(price.is_zero());
    }

    #[test]
    fn test_base_on_side_a_is_detected() {
        // base as side A: price of base in stablecoin is reserve_b / reserve_a
        let registry = registry_with(vec![Pool::new(
            USDC_POOL,
            BASE,
            USDC,
            dec("100"),
            dec("150"),
        )]);

        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert_eq!(price, dec("1.5"));
    }

    #[test]
    fn test_pool_without_base_token_is_ignored() {
        let registry = registry_with(vec![
            Pool::new(USDT_POOL, USDT, USDC, dec("100"), dec("100")),
            stable_pool(USDC_POOL, USDC, "400", "0.98"),
        ]);

        let price = AnchorPriceOracle::new(config()).base_price_in_usd(&registry);
        assert_eq!(price, dec("0.98"));
    }
}
