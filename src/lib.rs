pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod utils;

pub use config::{PricingConfig, Settings};
pub use db::{MemoryRegistry, PoolRegistry, Snapshot};
pub use error::PricingError;
pub use pricing::{
    AnchorPriceOracle, LiquidityClassifier, PassSummary, PricingPass, TokenPriceResolver,
    VolumeClassifier,
};
