use crate::domain::entities::{ScanOutcome, ValidationRecord};
use crate::domain::value_objects::Coordinates;
use crate::infrastructure::database::CacheStore;
use crate::shared::{AppError, Result};
use sqlx::Row;

#[derive(Clone)]
pub struct ValidationCache {
    store: CacheStore,
}

impl ValidationCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ValidationRecord>> {
        let pool = self.store.connection()?;
        let rows = sqlx::query(
            r#"
            SELECT user_id, qrcode_id, answer_id, latitude, longitude,
                   distance_meters, outcome, recorded_at
            FROM validations
            WHERE user_id = ?
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let user_id: String = row.try_get("user_id")?;
            let checkpoint_id: String = row.try_get("qrcode_id")?;
            let answer_id: String = row.try_get("answer_id")?;
            let latitude: f64 = row.try_get("latitude")?;
            let longitude: f64 = row.try_get("longitude")?;
            let distance_meters: f64 = row.try_get("distance_meters")?;
            let outcome: String = row.try_get("outcome")?;
            let recorded_at: i64 = row.try_get("recorded_at")?;

            let coordinates =
                Coordinates::new(latitude, longitude).map_err(AppError::ValidationError)?;
            let outcome = ScanOutcome::parse(&outcome).map_err(AppError::ValidationError)?;
            let recorded_at = chrono::DateTime::from_timestamp_millis(recorded_at)
                .ok_or_else(|| AppError::Database("Invalid recorded_at timestamp".to_string()))?;

            records.push(ValidationRecord::new(
                user_id,
                checkpoint_id,
                answer_id,
                coordinates,
                distance_meters,
                outcome,
                recorded_at,
            ));
        }
        Ok(records)
    }
}
