//! Temperature service: cache policy around the record store.
//!
//! Three policies are applied explicitly around store calls:
//! - write-through: `save_or_update` writes the persisted record to the
//!   per-city cache entry
//! - read-through: `get_by_city` and `get_all` consult the cache first and
//!   populate it from the store on a miss; absent results are never cached
//! - evict-on-delete: `delete` evicts before touching the store
//!
//! Store and cache writes are not atomic. A failure between them leaves the
//! cache stale until the next read repopulates it or the entry expires.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CacheConfig, CityTemperature, ListInvalidation};
use crate::domain::ports::{CacheNamespace, CacheStore, CityTemperatureRepository, ALL_RECORDS_KEY};

/// Cache behaviour for the service.
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Time-to-live applied to every entry the service writes.
    pub ttl: Duration,
    /// When the cached record list is invalidated.
    pub list_invalidation: ListInvalidation,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_secs),
            list_invalidation: config.list_invalidation,
        }
    }
}

/// Service for reading and writing city temperatures through the cache.
///
/// The repository and cache are injected once at startup.
#[derive(Clone)]
pub struct CityTemperatureService {
    repository: Arc<dyn CityTemperatureRepository>,
    cache: Arc<dyn CacheStore>,
    settings: CacheSettings,
}

impl CityTemperatureService {
    pub fn new(
        repository: Arc<dyn CityTemperatureRepository>,
        cache: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Upsert a record by city and write it through to the per-city cache.
    ///
    /// Under `ListInvalidation::Strict` the cached record list is evicted.
    #[instrument(skip(self, record), fields(city = %record.city), err)]
    pub async fn save_or_update(&self, record: CityTemperature) -> DomainResult<CityTemperature> {
        record.validate().map_err(DomainError::ValidationFailed)?;

        let persisted = self.repository.save(&record).await?;
        self.store(CacheNamespace::ByCity, &persisted.city, &persisted).await?;

        if self.settings.list_invalidation == ListInvalidation::Strict {
            self.evict(CacheNamespace::AllRecords, ALL_RECORDS_KEY).await?;
        }

        Ok(persisted)
    }

    /// Look up a city, serving from cache when possible.
    #[instrument(skip(self), err)]
    pub async fn get_by_city(&self, city: &str) -> DomainResult<Option<CityTemperature>> {
        self.read_through(CacheNamespace::ByCity, city, move || async move {
            debug!(city, "loading from store");
            self.repository.find_by_city(city).await
        })
        .await
    }

    /// List every record, serving the cached list when present.
    #[instrument(skip(self), err)]
    pub async fn get_all(&self) -> DomainResult<Vec<CityTemperature>> {
        let records = self
            .read_through(CacheNamespace::AllRecords, ALL_RECORDS_KEY, move || async move {
                debug!("loading all records from store");
                self.repository.find_all().await.map(Some)
            })
            .await?;

        Ok(records.unwrap_or_default())
    }

    /// Replace the temperature of an existing city.
    #[instrument(skip(self, temperature), err)]
    pub async fn update_temperature(
        &self,
        city: &str,
        temperature: impl Into<String>,
    ) -> DomainResult<CityTemperature> {
        let existing = self
            .get_by_city(city)
            .await?
            .ok_or_else(|| DomainError::CityNotFound(city.to_string()))?;

        self.save_or_update(existing.with_temperature(temperature)).await
    }

    /// Evict cached state for a city, then delete it from the store.
    ///
    /// Eviction happens first: if the store delete fails the next read goes
    /// to the store instead of serving the evicted value.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, city: &str) -> DomainResult<()> {
        self.evict(CacheNamespace::ByCity, city).await?;
        if self.settings.list_invalidation == ListInvalidation::Strict {
            self.evict(CacheNamespace::AllRecords, ALL_RECORDS_KEY).await?;
        }

        self.repository.delete_by_city(city).await
    }

    /// Serve `key` from the cache, or run `load` and cache a present result.
    async fn read_through<T, F, Fut>(
        &self,
        namespace: CacheNamespace,
        key: &str,
        load: F,
    ) -> DomainResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<Option<T>>>,
    {
        if let Some(raw) = self.cache.get(namespace, key).await? {
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(%namespace, key, "cache hit");
                    return Ok(Some(value));
                }
                Err(e) => {
                    warn!(%namespace, key, error = %e, "discarding undecodable cache entry");
                    self.evict(namespace, key).await?;
                }
            }
        } else {
            debug!(%namespace, key, "cache miss");
        }

        let loaded = load().await?;
        if let Some(ref value) = loaded {
            self.store(namespace, key, value).await?;
        }
        Ok(loaded)
    }

    async fn store<T: Serialize>(&self, namespace: CacheNamespace, key: &str, value: &T) -> DomainResult<()> {
        let payload = serde_json::to_string(value)?;
        self.cache.put(namespace, key, payload, self.settings.ttl).await
    }

    async fn evict(&self, namespace: CacheNamespace, key: &str) -> DomainResult<()> {
        debug!(%namespace, key, "cache evict");
        self.cache.evict(namespace, key).await
    }
}
