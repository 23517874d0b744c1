//! Utility functions for the pricing subsystem.
//!
//! - [`decimal`] - Zero-guarded decimal arithmetic and parsing

mod decimal;

// ============================================
// Address Helpers
// ============================================

/// Normalize an address for map keys and comparisons.
///
/// Addresses are compared case-insensitively everywhere, so they are stored
/// trimmed and lowercased.
#[inline]
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

// ============================================
// Re-exports
// ============================================

pub use decimal::{parse_decimal, safe_div};
