use crate::domain::entities::ScanOutcome;
use crate::domain::value_objects::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only record of one validation attempt. Persisted, not an entity;
/// the local mirror deduplicates by (user, checkpoint) on re-sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub user_id: String,
    pub checkpoint_id: String,
    pub answer_id: String,
    pub coordinates: Coordinates,
    pub distance_meters: f64,
    pub outcome: ScanOutcome,
    pub recorded_at: DateTime<Utc>,
}

impl ValidationRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        checkpoint_id: String,
        answer_id: String,
        coordinates: Coordinates,
        distance_meters: f64,
        outcome: ScanOutcome,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            checkpoint_id,
            answer_id,
            coordinates,
            distance_meters,
            outcome,
            recorded_at,
        }
    }
}

/// Per-user journey progress backing the `user_journeys` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyProgress {
    pub user_id: String,
    pub journey_id: String,
    pub current_point_index: usize,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl JourneyProgress {
    pub fn started(user_id: String, journey_id: String, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            journey_id,
            current_point_index: 0,
            is_completed: false,
            updated_at: at,
        }
    }
}
