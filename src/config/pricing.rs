use bigdecimal::BigDecimal;
use log::info;
use num_traits::Zero;

use super::PricingSettings;
use crate::{
    error::PricingError,
    utils::{normalize_address, parse_decimal},
};

/// Immutable pricing configuration shared by every pricing component.
///
/// Built once at startup and handed out behind an `Arc`. Addresses are
/// normalized, the whitelist keeps its configured order and always contains
/// the base token.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    base_token: String,
    whitelist: Vec<String>,
    stable_pools: [String; 2],
    minimum_liquidity_threshold: BigDecimal,
}

impl PricingConfig {
    pub fn new<I, S>(
        base_token: &str,
        whitelist: I,
        stable_pools: [&str; 2],
        minimum_liquidity_threshold: BigDecimal,
    ) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base_token = normalize_address(base_token);
        if base_token.is_empty() {
            return Err(PricingError::InvalidConfig(
                "base_token must not be empty".to_string(),
            ));
        }

        if minimum_liquidity_threshold < BigDecimal::zero() {
            return Err(PricingError::InvalidConfig(format!(
                "minimum_liquidity_threshold must not be negative, got {}",
                minimum_liquidity_threshold
            )));
        }

        let mut anchors: Vec<String> = Vec::new();
        for entry in whitelist {
            let address = normalize_address(entry.as_ref());
            if address.is_empty() || anchors.contains(&address) {
                continue;
            }
            anchors.push(address);
        }

        if !anchors.contains(&base_token) {
            info!(
                "Base token {} not listed in whitelist, appending it as the last anchor",
                base_token
            );
            anchors.push(base_token.clone());
        }

        let stable_pools = stable_pools.map(normalize_address);
        if stable_pools.iter().any(|p| p.is_empty()) {
            return Err(PricingError::InvalidConfig(
                "stable_pools entries must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_token,
            whitelist: anchors,
            stable_pools,
            minimum_liquidity_threshold,
        })
    }

    pub fn from_settings(settings: &PricingSettings) -> Result<Self, PricingError> {
        let threshold = parse_decimal(
            "minimum_liquidity_threshold",
            &settings.minimum_liquidity_threshold,
        )?;

        Self::new(
            &settings.base_token,
            &settings.whitelist,
            [
                settings.stable_pools.primary.as_str(),
                settings.stable_pools.secondary.as_str(),
            ],
            threshold,
        )
    }

    pub fn base_token(&self) -> &str {
        &self.base_token
    }

    /// Anchor tokens in lookup order.
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    pub fn stable_pools(&self) -> &[String; 2] {
        &self.stable_pools
    }

    pub fn minimum_liquidity_threshold(&self) -> &BigDecimal {
        &self.minimum_liquidity_threshold
    }

    pub fn is_base_token(&self, token: &str) -> bool {
        self.base_token == normalize_address(token)
    }

    pub fn is_whitelisted(&self, token: &str) -> bool {
        let token = normalize_address(token);
        self.whitelist.iter().any(|w| *w == token)
    }

    /// Position of `token` in the whitelist, if it is an anchor.
    pub fn anchor_rank(&self, token: &str) -> Option<usize> {
        let token = normalize_address(token);
        self.whitelist.iter().position(|w| *w == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StablePoolSettings;

    fn settings(threshold: &str) -> PricingSettings {
        PricingSettings {
            base_token: "0xBASE".to_string(),
            whitelist: vec![
                "0xWETH".to_string(),
                "0xusdc".to_string(),
                "0xweth".to_string(),
            ],
            stable_pools: StablePoolSettings {
                primary: "0xPool1".to_string(),
                secondary: "0xpool2".to_string(),
            },
            minimum_liquidity_threshold: threshold.to_string(),
        }
    }

    #[test]
    fn test_from_settings_normalizes_and_appends_base() {
        let config = PricingConfig::from_settings(&settings("0")).unwrap();

        assert_eq!(config.base_token(), "0xbase");
        assert_eq!(config.whitelist(), &["0xweth", "0xusdc", "0xbase"]);
        assert_eq!(config.stable_pools(), &["0xpool1", "0xpool2"]);
        assert!(config.minimum_liquidity_threshold().is_zero());
    }

    #[test]
    fn test_whitelist_membership_is_case_insensitive() {
        let config = PricingConfig::from_settings(&settings("0")).unwrap();

        assert!(config.is_whitelisted("0xUSDC"));
        assert!(config.is_whitelisted("0xBase"));
        assert!(!config.is_whitelisted("0xdoge"));
        assert!(config.is_base_token("0xBASE"));
        assert_eq!(config.anchor_rank("0xusdc"), Some(1));
        assert_eq!(config.anchor_rank("0xdoge"), None);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(matches!(
            PricingConfig::from_settings(&settings("-0.1")),
            Err(PricingError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            PricingConfig::from_settings(&settings("lots")),
            Err(PricingError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_base_token() {
        let result = PricingConfig::new(
            "  ",
            ["0xweth"],
            ["0xpool1", "0xpool2"],
            BigDecimal::zero(),
        );
        assert!(matches!(result, Err(PricingError::InvalidConfig(_))));
    }
}
