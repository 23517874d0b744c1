//! Tracked USD volume and liquidity.
//!
//! Only amounts on whitelisted sides count toward tracked figures. This keeps
//! prices derived through arbitrary tokens out of aggregate statistics:
//! - both sides whitelisted: both amounts are used
//! - one side whitelisted: only that side is used
//! - neither side whitelisted: nothing is tracked

use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::sync::Arc;

use crate::{config::PricingConfig, db::models::Token};

/// Which sides of a pair are whitelisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracked {
    Both,
    OnlyA,
    OnlyB,
    Neither,
}

fn classify(config: &PricingConfig, token_a: &Token, token_b: &Token) -> Tracked {
    match (
        config.is_whitelisted(&token_a.address),
        config.is_whitelisted(&token_b.address),
    ) {
        (true, true) => Tracked::Both,
        (true, false) => Tracked::OnlyA,
        (false, true) => Tracked::OnlyB,
        (false, false) => Tracked::Neither,
    }
}

/// `amount * derived_base_price * base_price_usd`
fn usd_value(base_price_usd: &BigDecimal, amount: &BigDecimal, token: &Token) -> BigDecimal {
    amount * &(&token.derived_base_price * base_price_usd)
}

/// Converts a trade's two-sided amounts into USD volume.
pub struct VolumeClassifier {
    config: Arc<PricingConfig>,
}

impl VolumeClassifier {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Tracked USD volume of a trade.
    ///
    /// When both sides are whitelisted the two USD values are averaged, since
    /// fees and slippage keep them from matching exactly.
    pub fn tracked_volume_usd(
        &self,
        base_price_usd: &BigDecimal,
        amount_a: &BigDecimal,
        token_a: &Token,
        amount_b: &BigDecimal,
        token_b: &Token,
    ) -> BigDecimal {
        match classify(&self.config, token_a, token_b) {
            Tracked::Both => {
                let total = usd_value(base_price_usd, amount_a, token_a)
                    + usd_value(base_price_usd, amount_b, token_b);
                total / BigDecimal::from(2)
            },
            Tracked::OnlyA => usd_value(base_price_usd, amount_a, token_a),
            Tracked::OnlyB => usd_value(base_price_usd, amount_b, token_b),
            Tracked::Neither => BigDecimal::zero(),
        }
    }

    /// USD value of both sides summed, regardless of whitelist membership.
    pub fn untracked_volume_usd(
        &self,
        base_price_usd: &BigDecimal,
        amount_a: &BigDecimal,
        token_a: &Token,
        amount_b: &BigDecimal,
        token_b: &Token,
    ) -> BigDecimal {
        usd_value(base_price_usd, amount_a, token_a) + usd_value(base_price_usd, amount_b, token_b)
    }
}

/// Converts a pool's two-sided reserves into USD liquidity.
pub struct LiquidityClassifier {
    config: Arc<PricingConfig>,
}

impl LiquidityClassifier {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Tracked USD liquidity of a pool.
    ///
    /// With a single whitelisted side the pool is assumed balanced, so that
    /// side's value is doubled.
    pub fn tracked_liquidity_usd(
        &self,
        base_price_usd: &BigDecimal,
        amount_a: &BigDecimal,
        token_a: &Token,
        amount_b: &BigDecimal,
        token_b: &Token,
    ) -> BigDecimal {
        let two = BigDecimal::from(2);
        match classify(&self.config, token_a, token_b) {
            Tracked::Both => {
                usd_value(base_price_usd, amount_a, token_a)
                    + usd_value(base_price_usd, amount_b, token_b)
            },
            Tracked::OnlyA => usd_value(base_price_usd, amount_a, token_a) * two,
            Tracked::OnlyB => usd_value(base_price_usd, amount_b, token_b) * two,
            Tracked::Neither => BigDecimal::zero(),
        }
    }
}
