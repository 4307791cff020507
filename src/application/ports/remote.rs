use crate::domain::entities::{JourneyProgress, ValidationRecord};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Rows as the backend returns them. Nested objects are optional because the
/// backend may answer with partial payloads; the mappers enforce the domain
/// invariants when these records cross into entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAnswer {
    pub id: String,
    pub question_id: String,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteQuestion {
    pub id: String,
    pub text: String,
    pub answers: Vec<RemoteAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCheckpoint {
    pub id: String,
    pub code: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub question: Option<RemoteQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteJourneyPoint {
    pub id: String,
    pub journey_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub order_index: i64,
    pub description: Option<String>,
    pub checkpoint: Option<RemoteCheckpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteJourney {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub points: Vec<RemoteJourneyPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait RemoteCheckpointSource: Send + Sync {
    async fn fetch_by_code(&self, code: &str) -> Result<Option<RemoteCheckpoint>>;
    async fn fetch_by_id(&self, id: &str) -> Result<Option<RemoteCheckpoint>>;
    async fn fetch_validations(&self, user_id: &str) -> Result<Vec<ValidationRecord>>;
}

#[async_trait]
pub trait RemoteValidationSink: Send + Sync {
    async fn push_validation(&self, record: &ValidationRecord) -> Result<()>;
}

#[async_trait]
pub trait RemoteJourneySource: Send + Sync {
    async fn fetch_journey(&self, id: &str) -> Result<Option<RemoteJourney>>;
    async fn fetch_journeys(&self) -> Result<Vec<RemoteJourney>>;
}

#[async_trait]
pub trait RemoteProgressSource: Send + Sync {
    async fn fetch_progress(
        &self,
        user_id: &str,
        journey_id: &str,
    ) -> Result<Option<JourneyProgress>>;
    async fn start_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress>;
    async fn save_progress(&self, progress: &JourneyProgress) -> Result<()>;
    async fn finish_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress>;
}

#[async_trait]
pub trait RemoteAuthSource: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<RemoteUser>;
    async fn sign_out(&self, user_id: &str) -> Result<()>;
    async fn fetch_user(&self, user_id: &str) -> Result<Option<RemoteUser>>;
}
