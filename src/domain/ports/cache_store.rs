//! Cache store port.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::domain::errors::DomainResult;

/// Fixed key under which the full record list is cached.
pub const ALL_RECORDS_KEY: &str = "allCityTemperatures";

/// Logical cache partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// One entry per city, keyed by city name.
    ByCity,
    /// A single entry holding the full record list.
    AllRecords,
}

impl CacheNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByCity => "temperatureCache",
            Self::AllRecords => "allTemperatureCache",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value cache holding serialized payloads.
///
/// A miss is `Ok(None)`, never an error. Errors are reserved for transport
/// failures and propagate to the caller.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read an entry. Expired entries read as absent.
    async fn get(&self, namespace: CacheNamespace, key: &str) -> DomainResult<Option<String>>;

    /// Write an entry, replacing any existing value and resetting its expiry to `ttl` from now.
    async fn put(
        &self,
        namespace: CacheNamespace,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> DomainResult<()>;

    /// Remove an entry if present.
    async fn evict(&self, namespace: CacheNamespace, key: &str) -> DomainResult<()>;
}
