use crate::application::ports::repositories::{JourneyRepository, ProgressRepository};
use crate::domain::entities::{Journey, JourneyProgress};
use crate::shared::{AppError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Journey use cases. Reads merge the journey definition with the user's
/// stored progress; all progress writes go through the connectivity-gated
/// progress repository.
pub struct JourneyService {
    journeys: Arc<dyn JourneyRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl JourneyService {
    pub fn new(journeys: Arc<dyn JourneyRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { journeys, progress }
    }

    pub async fn get_journey(&self, user_id: &str, journey_id: &str) -> Result<Option<Journey>> {
        let journey = match self.journeys.get_journey(journey_id).await? {
            Some(journey) => journey,
            None => return Ok(None),
        };

        match self.progress.progress_for(user_id, journey_id).await? {
            Some(progress) => Ok(Some(
                journey.with_progress(progress.current_point_index, progress.is_completed),
            )),
            None => Ok(Some(journey)),
        }
    }

    pub async fn list_journeys(&self) -> Result<Vec<Journey>> {
        self.journeys.list_journeys().await
    }

    pub async fn start_journey(&self, user_id: &str, journey_id: &str) -> Result<Journey> {
        let journey = self
            .journeys
            .get_journey(journey_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journey {}", journey_id)))?;

        let progress = self.progress.start_journey(user_id, journey_id).await?;
        Ok(journey.with_progress(progress.current_point_index, progress.is_completed))
    }

    /// Marks a point completed and persists the advanced index. Completing a
    /// point that is not the current one records it but does not advance.
    pub async fn complete_point(
        &self,
        user_id: &str,
        journey_id: &str,
        point_id: &str,
    ) -> Result<Journey> {
        let journey = self
            .get_journey(user_id, journey_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journey {}", journey_id)))?;

        let updated = journey.complete_point(point_id);

        let progress = JourneyProgress {
            user_id: user_id.to_string(),
            journey_id: journey_id.to_string(),
            current_point_index: updated.current_point_index,
            is_completed: updated.is_completed,
            updated_at: Utc::now(),
        };
        self.progress.save_progress(&progress).await?;

        Ok(updated)
    }

    pub async fn finish_journey(&self, user_id: &str, journey_id: &str) -> Result<Journey> {
        let journey = self
            .journeys
            .get_journey(journey_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journey {}", journey_id)))?;

        let progress = self.progress.finish_journey(user_id, journey_id).await?;
        Ok(journey.with_progress(progress.current_point_index, progress.is_completed))
    }
}
