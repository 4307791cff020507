use crate::domain::entities::{Checkpoint, Journey, JourneyProgress, User, ValidationRecord};
use crate::domain::value_objects::Code;
use crate::shared::{AppError, Result};
use async_trait::async_trait;

#[async_trait]
pub trait CheckpointRepository: Send + Sync {
    /// Resolves a scanned code. Exact business-code lookup first; if that
    /// finds nothing, a lookup by identifier is attempted before concluding
    /// "not found".
    async fn resolve(&self, code: &Code) -> Result<Option<Checkpoint>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Checkpoint>>;

    async fn validations_for_user(&self, user_id: &str) -> Result<Vec<ValidationRecord>>;
}

/// Capability interface for persisting validation rows. Only repositories
/// with a write path behind them implement this; cache-only implementations
/// do not, and callers hold it as an `Option`.
#[async_trait]
pub trait ValidationStore: Send + Sync {
    async fn save_validation(&self, record: &ValidationRecord) -> Result<()>;
}

#[async_trait]
pub trait JourneyRepository: Send + Sync {
    async fn get_journey(&self, id: &str) -> Result<Option<Journey>>;
    async fn list_journeys(&self) -> Result<Vec<Journey>>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn progress_for(
        &self,
        user_id: &str,
        journey_id: &str,
    ) -> Result<Option<JourneyProgress>>;

    /// Write: requires connectivity, fails with `ConnectivityRequired` offline.
    async fn start_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress>;

    /// Write: requires connectivity.
    async fn save_progress(&self, progress: &JourneyProgress) -> Result<()>;

    /// Write: requires connectivity.
    async fn finish_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Write-shaped: requires connectivity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    /// Write-shaped: requires connectivity.
    async fn sign_out(&self, user_id: &str) -> Result<()>;

    async fn current_user(&self, user_id: &str) -> Result<Option<User>>;
}

pub(crate) fn connectivity_required(operation: &str) -> AppError {
    AppError::ConnectivityRequired(format!("{} cannot run offline", operation))
}
