use crate::application::mappers::map_checkpoint;
use crate::application::ports::connectivity::Connectivity;
use crate::application::ports::remote::{RemoteCheckpointSource, RemoteValidationSink};
use crate::application::ports::repositories::{
    connectivity_required, CheckpointRepository, ValidationStore,
};
use crate::domain::entities::{Checkpoint, ValidationRecord};
use crate::domain::value_objects::Code;
use crate::infrastructure::database::cache::{CheckpointCache, ValidationCache};
use crate::infrastructure::database::CacheSynchronizer;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Remote-first checkpoint access with the local cache as fallback. Every
/// successful remote read warms the cache; the remote is attempted at most
/// once per call.
pub struct HybridCheckpointRepository {
    connectivity: Arc<dyn Connectivity>,
    remote: Arc<dyn RemoteCheckpointSource>,
    validation_sink: Arc<dyn RemoteValidationSink>,
    cache: CheckpointCache,
    validations: ValidationCache,
    synchronizer: CacheSynchronizer,
}

impl HybridCheckpointRepository {
    pub fn new(
        connectivity: Arc<dyn Connectivity>,
        remote: Arc<dyn RemoteCheckpointSource>,
        validation_sink: Arc<dyn RemoteValidationSink>,
        cache: CheckpointCache,
        validations: ValidationCache,
        synchronizer: CacheSynchronizer,
    ) -> Self {
        Self {
            connectivity,
            remote,
            validation_sink,
            cache,
            validations,
            synchronizer,
        }
    }

    async fn warm_cache(&self, checkpoint: &crate::application::ports::remote::RemoteCheckpoint) {
        if let Err(e) = self.synchronizer.sync_checkpoint(checkpoint).await {
            warn!(checkpoint_id = %checkpoint.id, "Checkpoint cache sync failed: {}", e);
        }
    }

    /// Remote lookup: exact code first, identifier fallback second.
    async fn fetch_remote(&self, code: &Code) -> Result<Option<Checkpoint>> {
        let record = match self.remote.fetch_by_code(code.as_str()).await? {
            Some(record) => Some(record),
            None => self.remote.fetch_by_id(code.as_str()).await?,
        };

        match record {
            Some(record) => {
                self.warm_cache(&record).await;
                map_checkpoint(&record).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CheckpointRepository for HybridCheckpointRepository {
    async fn resolve(&self, code: &Code) -> Result<Option<Checkpoint>> {
        if self.connectivity.check_connection().await {
            match self.fetch_remote(code).await {
                Ok(found) => return Ok(found),
                Err(e) => {
                    debug!("Remote checkpoint lookup failed, trying cache: {}", e);
                }
            }
        }

        match self.cache.get_by_code(code).await? {
            Some(checkpoint) => Ok(Some(checkpoint)),
            None => self.cache.get_by_id(code.as_str()).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Checkpoint>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_by_id(id).await {
                Ok(Some(record)) => {
                    self.warm_cache(&record).await;
                    return map_checkpoint(&record).map(Some);
                }
                Ok(None) => return Ok(None),
                Err(e) => {
                    debug!("Remote checkpoint fetch failed, trying cache: {}", e);
                }
            }
        }

        self.cache.get_by_id(id).await
    }

    async fn validations_for_user(&self, user_id: &str) -> Result<Vec<ValidationRecord>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_validations(user_id).await {
                Ok(records) => {
                    for record in &records {
                        if let Err(e) = self.synchronizer.sync_validation(record).await {
                            warn!(user_id, "Validation cache sync failed: {}", e);
                        }
                    }
                    return Ok(records);
                }
                Err(e) => {
                    debug!("Remote validation history failed, trying cache: {}", e);
                }
            }
        }

        self.validations.list_for_user(user_id).await
    }
}

#[async_trait]
impl ValidationStore for HybridCheckpointRepository {
    /// Write path: no offline queue exists, so persistence demands
    /// connectivity and fails fast without it.
    async fn save_validation(&self, record: &ValidationRecord) -> Result<()> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Validation persistence"));
        }

        self.validation_sink.push_validation(record).await?;
        if let Err(e) = self.synchronizer.sync_validation(record).await {
            warn!("Validation cache sync failed after remote write: {}", e);
        }
        Ok(())
    }
}
