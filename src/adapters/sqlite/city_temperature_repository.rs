//! SQLite implementation of the CityTemperatureRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::CityTemperature;
use crate::domain::ports::CityTemperatureRepository;

#[derive(Clone)]
pub struct SqliteCityTemperatureRepository {
    pool: SqlitePool,
}

impl SqliteCityTemperatureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityTemperatureRepository for SqliteCityTemperatureRepository {
    async fn find_by_city(&self, city: &str) -> DomainResult<Option<CityTemperature>> {
        let row: Option<CityTemperatureRow> = sqlx::query_as(
            "SELECT id, city, temperature FROM city_temperatures WHERE city = ?"
        )
        .bind(city)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, record: &CityTemperature) -> DomainResult<CityTemperature> {
        // Upsert on the unique city column keeps the original id on update.
        let row: CityTemperatureRow = sqlx::query_as(
            r#"INSERT INTO city_temperatures (city, temperature) VALUES (?, ?)
               ON CONFLICT(city) DO UPDATE SET temperature = excluded.temperature
               RETURNING id, city, temperature"#
        )
        .bind(&record.city)
        .bind(&record.temperature)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_all(&self) -> DomainResult<Vec<CityTemperature>> {
        let rows: Vec<CityTemperatureRow> = sqlx::query_as(
            "SELECT id, city, temperature FROM city_temperatures ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_city(&self, city: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM city_temperatures WHERE city = ?")
            .bind(city)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CityTemperatureRow {
    id: i64,
    city: String,
    temperature: String,
}

impl From<CityTemperatureRow> for CityTemperature {
    fn from(row: CityTemperatureRow) -> Self {
        Self {
            id: Some(row.id),
            city: row.city,
            temperature: row.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqliteCityTemperatureRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteCityTemperatureRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let repo = setup_test_repo().await;

        let saved = repo.save(&CityTemperature::new("Paris", "21")).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.city, "Paris");
        assert_eq!(saved.temperature, "21");
    }

    #[tokio::test]
    async fn test_save_existing_city_updates_in_place() {
        let repo = setup_test_repo().await;

        let first = repo.save(&CityTemperature::new("Paris", "21")).await.unwrap();
        let second = repo.save(&CityTemperature::new("Paris", "25")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.temperature, "25");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_city_is_case_sensitive() {
        let repo = setup_test_repo().await;
        repo.save(&CityTemperature::new("Paris", "21")).await.unwrap();

        assert!(repo.find_by_city("Paris").await.unwrap().is_some());
        assert!(repo.find_by_city("paris").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let repo = setup_test_repo().await;
        repo.save(&CityTemperature::new("Oslo", "3")).await.unwrap();
        repo.save(&CityTemperature::new("Cairo", "34")).await.unwrap();

        let cities: Vec<_> = repo.find_all().await.unwrap().into_iter().map(|r| r.city).collect();
        assert_eq!(cities, vec!["Oslo", "Cairo"]);
    }

    #[tokio::test]
    async fn test_delete_by_city() {
        let repo = setup_test_repo().await;
        repo.save(&CityTemperature::new("Oslo", "3")).await.unwrap();

        repo.delete_by_city("Oslo").await.unwrap();
        assert!(repo.find_by_city("Oslo").await.unwrap().is_none());

        // Deleting an absent city is not an error
        repo.delete_by_city("Oslo").await.unwrap();
    }
}
