use bigdecimal::BigDecimal;
use log::{debug, info, warn};
use num_traits::Zero;
use rustc_hash::FxHashSet;
use std::sync::Arc;

use super::{AnchorPriceOracle, LiquidityClassifier, TokenPriceResolver, VolumeClassifier};
use crate::{
    config::PricingConfig,
    db::{MemoryRegistry, PoolRegistry},
    error::PricingError,
    utils::{normalize_address, safe_div},
};

/// Counters reported by [`PricingPass::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    pub base_price_usd: BigDecimal,
    pub priced_tokens: usize,
    pub unpriced_tokens: usize,
    pub refreshed_pools: usize,
    /// Reprice/refresh rounds run before prices settled
    pub rounds: usize,
}

/// Sequences the pricing components over a mutable registry.
///
/// A token's derived price reads its anchor's derived price, so within one
/// pass the base token is priced first, then whitelist anchors in whitelist
/// order, then everything else. Each result is written back before the next
/// token is resolved.
///
/// Pool `reserve_base` gates the resolver but itself depends on derived
/// prices, so [`PricingPass::run`] alternates repricing and pool refreshes
/// until prices settle. Each round can extend pricing by one hop.
pub struct PricingPass {
    config: Arc<PricingConfig>,
    oracle: AnchorPriceOracle,
    resolver: TokenPriceResolver,
    volume: VolumeClassifier,
    liquidity: LiquidityClassifier,
}

impl PricingPass {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self {
            oracle: AnchorPriceOracle::new(config.clone()),
            resolver: TokenPriceResolver::new(config.clone()),
            volume: VolumeClassifier::new(config.clone()),
            liquidity: LiquidityClassifier::new(config.clone()),
            config,
        }
    }

    /// Recompute the base currency's USD price and store it in the bundle.
    pub fn refresh_bundle(&self, registry: &mut MemoryRegistry) -> BigDecimal {
        let price = self.oracle.base_price_in_usd(&*registry);
        registry.bundle_mut().update(price.clone());
        price
    }

    /// Anchor-first pricing order for `tokens`, duplicates removed.
    fn pricing_order(&self, tokens: &[String]) -> Vec<String> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut ordered: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = normalize_address(token);
            if seen.insert(token.clone()) {
                ordered.push(token);
            }
        }

        // stable sort: non-anchors keep their relative order
        ordered.sort_by_key(|token| {
            if self.config.is_base_token(token) {
                (0, 0)
            } else {
                match self.config.anchor_rank(token) {
                    Some(rank) => (1, rank),
                    None => (2, 0),
                }
            }
        });
        ordered
    }

    /// Price `tokens` in anchor-first order, writing each result back.
    pub fn reprice_tokens(
        &self,
        registry: &mut MemoryRegistry,
        tokens: &[String],
    ) -> Result<Vec<(String, BigDecimal)>, PricingError> {
        let order = self.pricing_order(tokens);
        let mut priced = Vec::with_capacity(order.len());

        for token in order {
            let price = self.resolver.find_base_price_per_token(&*registry, &token)?;
            if !registry.set_derived_base_price(&token, price.clone()) {
                warn!("Token {} has no record, derived price not stored", token);
            }
            priced.push((token, price));
        }

        Ok(priced)
    }

    /// Recompute a pool's derived prices and base/USD liquidity figures.
    pub fn refresh_pool(
        &self,
        registry: &mut MemoryRegistry,
        pool_address: &str,
    ) -> Result<(), PricingError> {
        let mut pool = registry
            .load_pool(pool_address)
            .cloned()
            .ok_or_else(|| PricingError::MissingPool(normalize_address(pool_address)))?;

        let missing = |token: &str| PricingError::MissingToken {
            token: token.to_string(),
            pool: pool.address.clone(),
        };
        let token_a = registry
            .load_token(&pool.token_a)
            .ok_or_else(|| missing(&pool.token_a))?;
        let token_b = registry
            .load_token(&pool.token_b)
            .ok_or_else(|| missing(&pool.token_b))?;
        let base_price_usd = registry.load_bundle().base_price_usd.clone();

        let reserve_usd = self.volume.untracked_volume_usd(
            &base_price_usd,
            &pool.reserve_a,
            token_a,
            &pool.reserve_b,
            token_b,
        );
        let tracked_usd = self.liquidity.tracked_liquidity_usd(
            &base_price_usd,
            &pool.reserve_a,
            token_a,
            &pool.reserve_b,
            token_b,
        );
        let (derived_a, derived_b) = (
            token_a.derived_base_price.clone(),
            token_b.derived_base_price.clone(),
        );

        pool.sync_prices();
        pool.update_reserve_base(&derived_a, &derived_b);
        pool.reserve_usd = reserve_usd;
        pool.tracked_reserve_base = safe_div(&tracked_usd, &base_price_usd);

        registry.insert_pool(pool);
        Ok(())
    }

    /// Full pass over a registry: pool prices, bundle, tokens, pool liquidity.
    pub fn run(&self, registry: &mut MemoryRegistry) -> Result<PassSummary, PricingError> {
        let pools = registry.pool_addresses();
        for address in &pools {
            if let Some(pool) = registry.pool_mut(address) {
                pool.sync_prices();
            }
        }

        let base_price_usd = self.refresh_bundle(registry);
        if base_price_usd.is_zero() {
            warn!("Base currency USD price is 0, USD figures will be 0 for this pass");
        }

        // every round can add one hop, and no token is more hops away than
        // there are anchors, plus one round to confirm nothing changed
        let max_rounds = self.config.whitelist().len() + 1;
        let tokens = registry.token_addresses();
        let mut previous: Option<Vec<(String, BigDecimal)>> = None;
        let mut rounds = 0;

        let priced = loop {
            let priced = self.reprice_tokens(registry, &tokens)?;
            for address in &pools {
                self.refresh_pool(registry, address)?;
            }
            rounds += 1;

            if previous.as_ref() == Some(&priced) || rounds >= max_rounds {
                break priced;
            }
            debug!("Pricing round {} changed derived prices, repricing", rounds);
            previous = Some(priced);
        };
        let priced_tokens = priced.iter().filter(|(_, p)| !p.is_zero()).count();

        let summary = PassSummary {
            base_price_usd,
            priced_tokens,
            unpriced_tokens: priced.len() - priced_tokens,
            refreshed_pools: pools.len(),
            rounds,
        };

        info!(
            "Pricing pass complete: base price ${}, {} tokens priced, {} unpriced, {} pools refreshed in {} rounds",
            summary.base_price_usd,
            summary.priced_tokens,
            summary.unpriced_tokens,
            summary.refreshed_pools,
            summary.rounds
        );

        Ok(summary)
    }
}
