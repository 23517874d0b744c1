//! JSON snapshot of the entity store.
//!
//! Lets the pricing pass run offline against a dump of pool, token and bundle
//! records. Decimals are encoded as strings to keep full precision.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use super::{
    models::{Bundle, Pool, Token},
    MemoryRegistry, PoolRegistry,
};
use crate::error::PricingError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub bundle: Bundle,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pools: Vec<Pool>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject negative prices and reserves anywhere in the snapshot.
    pub fn validate(&self) -> Result<(), PricingError> {
        non_negative("bundle.base_price_usd", &self.bundle.base_price_usd)?;

        for token in &self.tokens {
            non_negative("token.derived_base_price", &token.derived_base_price)?;
        }

        for pool in &self.pools {
            non_negative("pool.reserve_a", &pool.reserve_a)?;
            non_negative("pool.reserve_b", &pool.reserve_b)?;
            non_negative("pool.price_a_in_b", &pool.price_a_in_b)?;
            non_negative("pool.price_b_in_a", &pool.price_b_in_a)?;
            non_negative("pool.reserve_base", &pool.reserve_base)?;
            non_negative("pool.reserve_usd", &pool.reserve_usd)?;
            non_negative("pool.tracked_reserve_base", &pool.tracked_reserve_base)?;
        }

        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Capture a registry in deterministic (address) order.
    pub fn from_registry(registry: &MemoryRegistry) -> Self {
        let tokens = registry
            .token_addresses()
            .iter()
            .filter_map(|address| registry.load_token(address).cloned())
            .collect();
        let pools = registry
            .pool_addresses()
            .iter()
            .filter_map(|address| registry.load_pool(address).cloned())
            .collect();

        Self {
            bundle: registry.load_bundle().clone(),
            tokens,
            pools,
        }
    }

    pub fn to_json(&self) -> Result<String, PricingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), PricingError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn into_registry(self) -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.set_bundle(self.bundle);
        for token in self.tokens {
            registry.insert_token(token);
        }
        for pool in self.pools {
            registry.insert_pool(pool);
        }
        registry
    }
}

fn non_negative(field: &'static str, value: &BigDecimal) -> Result<(), PricingError> {
    if *value < BigDecimal::zero() {
        return Err(PricingError::InvalidDecimal {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    const SNAPSHOT: &str = r#"{
        "bundle": { "base_price_usd": "1.5" },
        "tokens": [
            { "address": "0xBASE", "symbol": "BASE", "derived_base_price": "1" },
            { "address": "0xtok" }
        ],
        "pools": [
            {
                "address": "0xPAIR",
                "token_a": "0xtok",
                "token_b": "0xbase",
                "reserve_a": "200",
                "reserve_b": "50",
                "reserve_base": "100"
            }
        ]
    }"#;

    #[test]
    fn test_snapshot_into_registry() {
        let registry = Snapshot::from_json(SNAPSHOT).unwrap().into_registry();

        assert_eq!(registry.token_count(), 2);
        assert_eq!(
            registry.load_bundle().base_price_usd,
            BigDecimal::from_str("1.5").unwrap()
        );
        assert_eq!(registry.find_pool("0xbase", "0xTOK").as_deref(), Some("0xpair"));

        let token = registry.load_token("0xtok").unwrap();
        assert_eq!(token.derived_base_price, BigDecimal::default());
        assert_eq!(token.symbol, "");
    }

    #[test]
    fn test_snapshot_survives_registry_capture() {
        let registry = Snapshot::from_json(SNAPSHOT).unwrap().into_registry();
        let json = Snapshot::from_registry(&registry).to_json().unwrap();
        let reloaded = Snapshot::from_json(&json).unwrap();

        assert_eq!(reloaded.tokens[0].address, "0xbase");
        assert_eq!(reloaded.pools.len(), 1);
        assert_eq!(
            reloaded.pools[0].reserve_base,
            BigDecimal::from_str("100").unwrap()
        );
    }

    #[test]
    fn test_snapshot_rejects_malformed_json() {
        assert!(matches!(
            Snapshot::from_json("{ \"tokens\": 3 }"),
            Err(PricingError::Snapshot(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_negative_values() {
        let negative_reserve =
            SNAPSHOT.replace("\"reserve_a\": \"200\"", "\"reserve_a\": \"-200\"");
        match Snapshot::from_json(&negative_reserve) {
            Err(PricingError::InvalidDecimal { field, value }) => {
                assert_eq!(field, "pool.reserve_a");
                assert_eq!(value, "-200");
            },
            other => panic!("expected InvalidDecimal, got {:?}", other),
        }

        let negative_price = SNAPSHOT.replace("\"1.5\"", "\"-1.5\"");
        assert!(matches!(
            Snapshot::from_json(&negative_price),
            Err(PricingError::InvalidDecimal {
                field: "bundle.base_price_usd",
                ..
            })
        ));

        let negative_token = SNAPSHOT.replace(
            "\"derived_base_price\": \"1\"",
            "\"derived_base_price\": \"-1\"",
        );
        assert!(matches!(
            Snapshot::from_json(&negative_token),
            Err(PricingError::InvalidDecimal {
                field: "token.derived_base_price",
                ..
            })
        ));
    }
}
