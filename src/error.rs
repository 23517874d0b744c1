use thiserror::Error;

/// Errors surfaced by the pricing subsystem.
///
/// Missing pools, zero reserves and unmatched whitelists are not errors: they
/// degrade to a zero price. Only data-consistency violations and bad
/// configuration/snapshot input end up here.
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Token {token} referenced by pool {pool} is missing from the registry")]
    MissingToken { token: String, pool: String },

    #[error("Pool {0} is missing from the registry")]
    MissingPool(String),

    #[error("Invalid decimal for {field}: {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
