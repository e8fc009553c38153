//! Weather Cache - city temperature service with a cache in front of SQLite
//!
//! Temperature records are stored durably in SQLite and served through an
//! in-process TTL cache using three explicit policies: write-through on save,
//! read-through on lookup, and evict-on-delete.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): the cache policy around the record store
//! - **Adapters** (`adapters`): SQLite store, moka cache, axum HTTP API
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use weather_cache::adapters::cache::MokaCacheStore;
//! use weather_cache::adapters::sqlite::{initialize_database, SqliteCityTemperatureRepository};
//! use weather_cache::{CacheSettings, CityTemperature, CityTemperatureService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pool = initialize_database("sqlite:data/weather.db", None).await?;
//! let service = CityTemperatureService::new(
//!     Arc::new(SqliteCityTemperatureRepository::new(pool)),
//!     Arc::new(MokaCacheStore::new()),
//!     CacheSettings::default(),
//! );
//!
//! service.save_or_update(CityTemperature::new("Paris", "21")).await?;
//! assert!(service.get_by_city("Paris").await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{CityTemperature, Config, ListInvalidation, TemperatureUpdate};
pub use domain::ports::{CacheNamespace, CacheStore, CityTemperatureRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CacheSettings, CityTemperatureService};
