//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use weather_cache::adapters::cache::MokaCacheStore;
use weather_cache::adapters::sqlite::{create_migrated_test_pool, SqliteCityTemperatureRepository};
use weather_cache::{CacheSettings, CityTemperatureService, ListInvalidation};

/// Service over a fresh in-memory database and an empty cache.
pub async fn setup_service(list_invalidation: ListInvalidation) -> CityTemperatureService {
    setup_service_with_ttl(list_invalidation, Duration::from_secs(60)).await
}

pub async fn setup_service_with_ttl(list_invalidation: ListInvalidation, ttl: Duration) -> CityTemperatureService {
    let pool = create_migrated_test_pool()
        .await
        .expect("failed to create test database");

    CityTemperatureService::new(
        Arc::new(SqliteCityTemperatureRepository::new(pool)),
        Arc::new(MokaCacheStore::new()),
        CacheSettings { ttl, list_invalidation },
    )
}
