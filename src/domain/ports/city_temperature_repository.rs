//! City temperature repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::CityTemperature;

/// Repository interface for durable city temperature records.
#[async_trait]
pub trait CityTemperatureRepository: Send + Sync {
    /// Exact, case-sensitive lookup by city name.
    async fn find_by_city(&self, city: &str) -> DomainResult<Option<CityTemperature>>;

    /// Insert a new city or update the existing one, returning the persisted
    /// record with its store-assigned id.
    async fn save(&self, record: &CityTemperature) -> DomainResult<CityTemperature>;

    /// List every record.
    async fn find_all(&self) -> DomainResult<Vec<CityTemperature>>;

    /// Delete the record for a city. Absent cities are a no-op.
    async fn delete_by_city(&self, city: &str) -> DomainResult<()>;
}
