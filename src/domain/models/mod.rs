//! Domain models for the weather cache service.

pub mod city_temperature;
pub mod config;

pub use city_temperature::{CityTemperature, TemperatureUpdate};
pub use config::{
    CacheConfig, Config, DatabaseConfig, ListInvalidation, LogFormat, LoggingConfig,
    RotationPolicy, ServerConfig,
};
