pub mod memory;
pub mod models;
pub mod snapshot;

pub use memory::MemoryRegistry;
pub use snapshot::Snapshot;

use models::{Bundle, Pool, Token};

/// Read-only view of the entity store backing the pricing subsystem.
///
/// Pool, token and bundle records are owned by the indexing engine. Every
/// read returns an `Option` so absent records degrade instead of faulting.
pub trait PoolRegistry {
    /// Address of the pool pairing `token_x` and `token_y`, in either order.
    fn find_pool(&self, token_x: &str, token_y: &str) -> Option<String>;

    fn load_pool(&self, address: &str) -> Option<&Pool>;

    fn load_token(&self, address: &str) -> Option<&Token>;

    fn load_bundle(&self) -> &Bundle;
}
