use bigdecimal::BigDecimal;
use rustc_hash::FxHashMap;

use super::{
    models::{Bundle, Pool, Token},
    PoolRegistry,
};
use crate::utils::normalize_address;

/// In-memory entity store.
///
/// Keeps pools and tokens keyed by lowercase address plus an unordered pair
/// index so `find_pool(x, y) == find_pool(y, x)`.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    pools: FxHashMap<String, Pool>,
    tokens: FxHashMap<String, Token>,
    pairs: FxHashMap<(String, String), String>,
    bundle: Bundle,
}

fn pair_key(token_x: &str, token_y: &str) -> (String, String) {
    let x = normalize_address(token_x);
    let y = normalize_address(token_y);
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a pool and index its pair.
    pub fn insert_pool(&mut self, mut pool: Pool) {
        pool.address = normalize_address(&pool.address);
        pool.token_a = normalize_address(&pool.token_a);
        pool.token_b = normalize_address(&pool.token_b);

        self.pairs.insert(
            pair_key(&pool.token_a, &pool.token_b),
            pool.address.clone(),
        );
        self.pools.insert(pool.address.clone(), pool);
    }

    pub fn insert_token(&mut self, mut token: Token) {
        token.address = normalize_address(&token.address);
        self.tokens.insert(token.address.clone(), token);
    }

    pub fn pool_mut(&mut self, address: &str) -> Option<&mut Pool> {
        self.pools.get_mut(&normalize_address(address))
    }

    /// Write a token's derived base price. Returns false if the token is unknown.
    pub fn set_derived_base_price(&mut self, address: &str, price: BigDecimal) -> bool {
        match self.tokens.get_mut(&normalize_address(address)) {
            Some(token) => {
                token.derived_base_price = price;
                true
            },
            None => false,
        }
    }

    pub fn set_bundle(&mut self, bundle: Bundle) {
        self.bundle = bundle;
    }

    pub fn bundle_mut(&mut self) -> &mut Bundle {
        &mut self.bundle
    }

    /// Token addresses in ascending order.
    pub fn token_addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.tokens.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    /// Pool addresses in ascending order.
    pub fn pool_addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.pools.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl PoolRegistry for MemoryRegistry {
    fn find_pool(&self, token_x: &str, token_y: &str) -> Option<String> {
        let key = pair_key(token_x, token_y);
        if key.0 == key.1 {
            return None;
        }
        self.pairs.get(&key).cloned()
    }

    fn load_pool(&self, address: &str) -> Option<&Pool> {
        self.pools.get(&normalize_address(address))
    }

    fn load_token(&self, address: &str) -> Option<&Token> {
        self.tokens.get(&normalize_address(address))
    }

    fn load_bundle(&self) -> &Bundle {
        &self.bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_find_pool_is_order_insensitive() {
        let mut registry = MemoryRegistry::new();
        registry.insert_pool(Pool::new("0xPair", "0xAAA", "0xbbb", dec("1"), dec("1")));

        assert_eq!(registry.find_pool("0xaaa", "0xbbb").as_deref(), Some("0xpair"));
        assert_eq!(registry.find_pool("0xBBB", "0xaaa").as_deref(), Some("0xpair"));
        assert_eq!(registry.find_pool("0xaaa", "0xccc"), None);
        assert_eq!(registry.find_pool("0xaaa", "0xaaa"), None);
    }

    #[test]
    fn test_set_derived_base_price() {
        let mut registry = MemoryRegistry::new();
        registry.insert_token(Token::new("0xTok", "TOK"));

        assert!(registry.set_derived_base_price("0xtok", dec("0.25")));
        assert!(!registry.set_derived_base_price("0xmissing", dec("1")));
        assert_eq!(
            registry.load_token("0xTOK").unwrap().derived_base_price,
            dec("0.25")
        );
    }

    #[test]
    fn test_addresses_are_sorted() {
        let mut registry = MemoryRegistry::new();
        registry.insert_token(Token::new("0xc", "C"));
        registry.insert_token(Token::new("0xa", "A"));
        registry.insert_token(Token::new("0xb", "B"));

        assert_eq!(registry.token_addresses(), vec!["0xa", "0xb", "0xc"]);
    }
}
