use crate::application::ports::repositories::{CheckpointRepository, ValidationStore};
use crate::domain::entities::{Checkpoint, ScanOutcome, ValidationRecord};
use crate::domain::value_objects::Coordinates;
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub use crate::shared::config::DEFAULT_PROXIMITY_RADIUS_METERS;

#[derive(Debug, Clone)]
pub struct ValidateCheckpointParams {
    pub checkpoint_id: String,
    pub user_id: String,
    pub coordinates: Coordinates,
    pub answer_id: String,
    /// Per-call override of the configured proximity radius.
    pub radius_meters: Option<f64>,
}

/// Every expected outcome of a validation attempt, including an absent
/// checkpoint. Only infrastructure faults surface as `Err`.
#[derive(Debug, Clone)]
pub enum ValidationVerdict {
    CheckpointNotFound,
    OutOfRange {
        checkpoint: Checkpoint,
        distance_meters: f64,
        radius_meters: f64,
    },
    WrongAnswer {
        checkpoint: Checkpoint,
        distance_meters: f64,
    },
    Validated {
        checkpoint: Checkpoint,
        distance_meters: f64,
    },
}

impl ValidationVerdict {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationVerdict::Validated { .. })
    }

    /// Flattened shape handed to UI collaborators.
    pub fn to_report(&self) -> ValidationReport {
        match self {
            ValidationVerdict::CheckpointNotFound => ValidationReport {
                success: false,
                checkpoint: None,
                message: "Checkpoint not found".to_string(),
                errors: None,
            },
            ValidationVerdict::OutOfRange {
                checkpoint,
                distance_meters,
                radius_meters,
            } => ValidationReport {
                success: false,
                checkpoint: Some(checkpoint.clone()),
                message: format!(
                    "You are {:.0}m away, get within {:.0}m of the checkpoint",
                    distance_meters, radius_meters
                ),
                errors: Some(ValidationErrors {
                    location_mismatch: true,
                    wrong_answer: false,
                    distance_meters: Some(*distance_meters),
                }),
            },
            ValidationVerdict::WrongAnswer {
                checkpoint,
                distance_meters,
            } => ValidationReport {
                success: false,
                checkpoint: Some(checkpoint.clone()),
                message: "Wrong answer, try again".to_string(),
                errors: Some(ValidationErrors {
                    location_mismatch: false,
                    wrong_answer: true,
                    distance_meters: Some(*distance_meters),
                }),
            },
            ValidationVerdict::Validated { checkpoint, .. } => ValidationReport {
                success: true,
                checkpoint: Some(checkpoint.clone()),
                message: "Checkpoint validated".to_string(),
                errors: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub checkpoint: Option<Checkpoint>,
    pub message: String,
    pub errors: Option<ValidationErrors>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrors {
    pub location_mismatch: bool,
    pub wrong_answer: bool,
    pub distance_meters: Option<f64>,
}

/// Orchestrates one checkpoint validation: fetch, distance gate, answer gate,
/// persist. The gates are strictly sequential, so a wrong answer at a wrong
/// location reports the location first.
pub struct ValidationService {
    checkpoints: Arc<dyn CheckpointRepository>,
    validations: Option<Arc<dyn ValidationStore>>,
    default_radius_meters: f64,
}

impl ValidationService {
    pub fn new(
        checkpoints: Arc<dyn CheckpointRepository>,
        validations: Option<Arc<dyn ValidationStore>>,
        default_radius_meters: f64,
    ) -> Self {
        Self {
            checkpoints,
            validations,
            default_radius_meters,
        }
    }

    pub async fn validate(&self, params: ValidateCheckpointParams) -> Result<ValidationVerdict> {
        let checkpoint = match self.checkpoints.get_by_id(&params.checkpoint_id).await? {
            Some(checkpoint) => checkpoint,
            None => return Ok(ValidationVerdict::CheckpointNotFound),
        };

        let distance_meters = checkpoint.coordinates.distance_meters(&params.coordinates);
        let radius_meters = params.radius_meters.unwrap_or(self.default_radius_meters);
        let now = Utc::now();

        if distance_meters > radius_meters {
            let checkpoint = checkpoint.with_outcome(ScanOutcome::Mismatched, now);
            self.persist(&params, distance_meters, ScanOutcome::Mismatched)
                .await;
            return Ok(ValidationVerdict::OutOfRange {
                checkpoint,
                distance_meters,
                radius_meters,
            });
        }

        if !checkpoint.question.is_correct_answer(&params.answer_id) {
            let checkpoint = checkpoint.with_outcome(ScanOutcome::Mismatched, now);
            self.persist(&params, distance_meters, ScanOutcome::Mismatched)
                .await;
            return Ok(ValidationVerdict::WrongAnswer {
                checkpoint,
                distance_meters,
            });
        }

        let checkpoint = checkpoint.with_outcome(ScanOutcome::Matched, now);
        self.persist(&params, distance_meters, ScanOutcome::Matched)
            .await;
        Ok(ValidationVerdict::Validated {
            checkpoint,
            distance_meters,
        })
    }

    /// Best-effort: the outcome is already decided, a persistence failure must
    /// not mask it.
    async fn persist(
        &self,
        params: &ValidateCheckpointParams,
        distance_meters: f64,
        outcome: ScanOutcome,
    ) {
        let store = match &self.validations {
            Some(store) => store,
            None => return,
        };

        let record = ValidationRecord::new(
            params.user_id.clone(),
            params.checkpoint_id.clone(),
            params.answer_id.clone(),
            params.coordinates,
            distance_meters,
            outcome,
            Utc::now(),
        );
        if let Err(e) = store.save_validation(&record).await {
            warn!(
                checkpoint_id = %params.checkpoint_id,
                "Validation row not persisted: {}",
                e
            );
        }
    }
}
