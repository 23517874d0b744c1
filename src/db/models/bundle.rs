use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton holding the current USD price of the base currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Bundle {
    #[serde(default)]
    pub base_price_usd: BigDecimal,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Bundle {
    pub fn update(&mut self, base_price_usd: BigDecimal) {
        self.base_price_usd = base_price_usd;
        self.updated_at = Some(Utc::now());
    }
}
