//! Price derivation and tracked-value computation.
//!
//! - [`AnchorPriceOracle`] - USD price of the base currency
//! - [`TokenPriceResolver`] - one-hop token price in base currency
//! - [`VolumeClassifier`] / [`LiquidityClassifier`] - whitelist-tracked USD figures
//! - [`PricingPass`] - anchor-first sequencing over a registry

mod anchor_oracle;
mod pass;
mod token_resolver;
mod tracked_value;

pub use anchor_oracle::AnchorPriceOracle;
pub use pass::{PassSummary, PricingPass};
pub use token_resolver::TokenPriceResolver;
pub use tracked_value::{LiquidityClassifier, VolumeClassifier};
