//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - CityTemperatureRepository: durable record store
//! - CacheStore: key-value cache with per-entry expiry

pub mod cache_store;
pub mod city_temperature_repository;

pub use cache_store::{CacheNamespace, CacheStore, ALL_RECORDS_KEY};
pub use city_temperature_repository::CityTemperatureRepository;
