mod bundle;
mod pool;
mod token;

pub use bundle::Bundle;
pub use pool::{Pool, PoolSide};
pub use token::Token;
