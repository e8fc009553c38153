//! City temperature domain model.
//!
//! A record is keyed by its city name (case-sensitive, unique). The numeric
//! id is assigned by the record store on first write and never changes.

use serde::{Deserialize, Serialize};

/// Temperature reading for a single city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTemperature {
    /// Store-assigned identity; `None` until persisted.
    #[serde(default)]
    pub id: Option<i64>,
    /// City name, the natural key.
    pub city: String,
    /// Free-form, unit-less temperature value.
    pub temperature: String,
}

impl CityTemperature {
    /// Create an unpersisted record.
    pub fn new(city: impl Into<String>, temperature: impl Into<String>) -> Self {
        Self {
            id: None,
            city: city.into(),
            temperature: temperature.into(),
        }
    }

    pub fn with_temperature(mut self, temperature: impl Into<String>) -> Self {
        self.temperature = temperature.into();
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Validate the record before it is written.
    pub fn validate(&self) -> Result<(), String> {
        if self.city.trim().is_empty() {
            return Err("city cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Partial update body: only the temperature may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureUpdate {
    pub temperature: String,
}
