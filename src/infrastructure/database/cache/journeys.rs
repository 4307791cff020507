use crate::domain::entities::{Journey, JourneyPoint};
use crate::domain::value_objects::Coordinates;
use crate::infrastructure::database::CacheStore;
use crate::shared::{AppError, Result};
use sqlx::Row;

#[derive(Clone)]
pub struct JourneyCache {
    store: CacheStore,
}

impl JourneyCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub async fn get_journey(&self, id: &str) -> Result<Option<Journey>> {
        let pool = self.store.connection()?;
        let row = sqlx::query("SELECT id, name, description FROM journeys WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => self.assemble(row).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn list_journeys(&self) -> Result<Vec<Journey>> {
        let pool = self.store.connection()?;
        let rows = sqlx::query("SELECT id, name, description FROM journeys ORDER BY name")
            .fetch_all(pool)
            .await?;

        let mut journeys = Vec::with_capacity(rows.len());
        for row in rows {
            journeys.push(self.assemble(row).await?);
        }
        Ok(journeys)
    }

    async fn assemble(&self, row: sqlx::sqlite::SqliteRow) -> Result<Journey> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;

        let points = self.load_points(&id).await?;
        Journey::new(id, name, description, points).map_err(AppError::ValidationError)
    }

    async fn load_points(&self, journey_id: &str) -> Result<Vec<JourneyPoint>> {
        let pool = self.store.connection()?;
        let rows = sqlx::query(
            r#"
            SELECT id, name, latitude, longitude, description
            FROM journey_points
            WHERE journey_id = ?
            ORDER BY order_index
            "#,
        )
        .bind(journey_id)
        .fetch_all(pool)
        .await?;

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let name: String = row.try_get("name")?;
            let latitude: f64 = row.try_get("latitude")?;
            let longitude: f64 = row.try_get("longitude")?;
            let description: Option<String> = row.try_get("description")?;

            let coordinates =
                Coordinates::new(latitude, longitude).map_err(AppError::ValidationError)?;
            points.push(JourneyPoint::new(id, name, coordinates, description));
        }
        Ok(points)
    }
}
