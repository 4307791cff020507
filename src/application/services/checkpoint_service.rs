use crate::application::ports::repositories::CheckpointRepository;
use crate::domain::entities::{Checkpoint, ValidationRecord};
use crate::domain::value_objects::Code;
use crate::shared::{AppError, Result};
use std::sync::Arc;

/// Thin scan use case: turn the raw scanned string into a `Code` and resolve
/// it through the hybrid repository.
pub struct CheckpointService {
    checkpoints: Arc<dyn CheckpointRepository>,
}

impl CheckpointService {
    pub fn new(checkpoints: Arc<dyn CheckpointRepository>) -> Self {
        Self { checkpoints }
    }

    pub async fn scan(&self, raw_code: &str) -> Result<Option<Checkpoint>> {
        let code = Code::new(raw_code.to_string()).map_err(AppError::InvalidInput)?;
        self.checkpoints.resolve(&code).await
    }

    pub async fn get_checkpoint(&self, id: &str) -> Result<Option<Checkpoint>> {
        self.checkpoints.get_by_id(id).await
    }

    pub async fn validation_history(&self, user_id: &str) -> Result<Vec<ValidationRecord>> {
        self.checkpoints.validations_for_user(user_id).await
    }
}
