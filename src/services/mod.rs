//! Service layer: cache policy orchestration.

pub mod city_temperature_service;

pub use city_temperature_service::{CacheSettings, CityTemperatureService};
