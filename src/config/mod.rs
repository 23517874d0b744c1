mod config;
mod pricing;

pub use config::{PricingSettings, Settings, SnapshotSettings, StablePoolSettings};
pub use pricing::PricingConfig;
