//! Durable key-value storage for the RocketShoes cart.
//!
//! A [`KeyValueStore`] is the raw string substrate (a file on disk, Spin's
//! key-value store, or memory in tests). [`Cache`] layers automatic JSON
//! serialization on top of any store.
//!
//! # Example
//!
//! ```rust
//! use rocketshoes_cache::{cache_key, Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Item {
//!     id: u64,
//!     amount: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("@RocketShoes", "cart");
//!
//! cache.set(&key, &vec![Item { id: 1, amount: 2 }]).unwrap();
//! let items: Option<Vec<Item>> = cache.get(&key).unwrap();
//! assert_eq!(items, Some(vec![Item { id: 1, amount: 2 }]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreBound};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
