use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Pool pair used by the anchor price oracle.
///
/// Both pools pair a stablecoin with the base currency. Which side holds the
/// base currency is detected from the pool record, not configured.
#[derive(Debug, Deserialize, Clone)]
pub struct StablePoolSettings {
    pub primary: String,
    pub secondary: String,
}

/// Price derivation configuration.
///
/// - `base_token`: the chain's pricing anchor (price 1 in its own units)
/// - `whitelist`: ordered anchor tokens; order decides which anchor prices a token
/// - `minimum_liquidity_threshold`: pools at or below this base-currency
///   liquidity are ignored for price discovery
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub base_token: String,
    #[serde(default)]
    pub whitelist: Vec<String>,
    pub stable_pools: StablePoolSettings,
    #[serde(default = "default_minimum_liquidity_threshold")]
    pub minimum_liquidity_threshold: String,
}

fn default_minimum_liquidity_threshold() -> String {
    "0".to_string()
}

/// Registry snapshot input/output.
#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    #[serde(default = "default_snapshot_path")]
    pub path: String,
    /// Where to write the priced snapshot. Nothing is written when unset.
    #[serde(default)]
    pub output: Option<String>,
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            output: None,
        }
    }
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
    #[serde(default)]
    pub snapshot: SnapshotSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
