//! `CacheStore` backed by a moka TTL cache.
//!
//! Entries carry their own time-to-live so a `put` always restarts the
//! expiry clock, matching the overwrite semantics of a remote key-value
//! cache. There is no capacity bound.

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::errors::DomainResult;
use crate::domain::ports::{CacheNamespace, CacheStore};

type CacheKey = (CacheNamespace, String);

#[derive(Clone)]
struct CachedPayload {
    payload: Arc<str>,
    ttl: Duration,
}

/// Expire each entry `ttl` after it was last written. Reads do not extend it.
struct PerEntryTtl;

impl Expiry<CacheKey, CachedPayload> for PerEntryTtl {
    fn expire_after_create(&self, _key: &CacheKey, value: &CachedPayload, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CachedPayload,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache store.
#[derive(Clone)]
pub struct MokaCacheStore {
    entries: Cache<CacheKey, CachedPayload>,
}

impl MokaCacheStore {
    pub fn new() -> Self {
        let entries = Cache::builder().expire_after(PerEntryTtl).build();
        Self { entries }
    }
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, namespace: CacheNamespace, key: &str) -> DomainResult<Option<String>> {
        let cached = self.entries.get(&(namespace, key.to_string())).await;
        Ok(cached.map(|entry| entry.payload.to_string()))
    }

    async fn put(
        &self,
        namespace: CacheNamespace,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> DomainResult<()> {
        let entry = CachedPayload {
            payload: Arc::from(value),
            ttl,
        };
        self.entries.insert((namespace, key.to_string()), entry).await;
        Ok(())
    }

    async fn evict(&self, namespace: CacheNamespace, key: &str) -> DomainResult<()> {
        self.entries.invalidate(&(namespace, key.to_string())).await;
        Ok(())
    }
}
