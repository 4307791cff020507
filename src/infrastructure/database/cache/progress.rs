use crate::domain::entities::JourneyProgress;
use crate::infrastructure::database::CacheStore;
use crate::shared::{AppError, Result};
use sqlx::Row;

#[derive(Clone)]
pub struct ProgressCache {
    store: CacheStore,
}

impl ProgressCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub async fn progress_for(
        &self,
        user_id: &str,
        journey_id: &str,
    ) -> Result<Option<JourneyProgress>> {
        let pool = self.store.connection()?;
        let row = sqlx::query(
            r#"
            SELECT current_point_index, is_completed, updated_at
            FROM user_journeys
            WHERE user_id = ? AND journey_id = ?
            "#,
        )
        .bind(user_id)
        .bind(journey_id)
        .fetch_optional(pool)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let current_point_index: i64 = row.try_get("current_point_index")?;
        let is_completed: i64 = row.try_get("is_completed")?;
        let updated_at: i64 = row.try_get("updated_at")?;

        let updated_at = chrono::DateTime::from_timestamp_millis(updated_at)
            .ok_or_else(|| AppError::Database("Invalid updated_at timestamp".to_string()))?;

        Ok(Some(JourneyProgress {
            user_id: user_id.to_string(),
            journey_id: journey_id.to_string(),
            current_point_index: current_point_index.max(0) as usize,
            is_completed: is_completed != 0,
            updated_at,
        }))
    }
}
