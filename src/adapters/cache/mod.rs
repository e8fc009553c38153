//! In-memory cache layer.
//!
//! Uses `moka` for TTL-based concurrent caching. Values are serialized
//! payloads partitioned by `CacheNamespace`.

pub mod moka_cache_store;

pub use moka_cache_store::MokaCacheStore;
