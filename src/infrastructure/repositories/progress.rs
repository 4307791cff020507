use crate::application::ports::connectivity::Connectivity;
use crate::application::ports::remote::RemoteProgressSource;
use crate::application::ports::repositories::{connectivity_required, ProgressRepository};
use crate::domain::entities::JourneyProgress;
use crate::infrastructure::database::cache::ProgressCache;
use crate::infrastructure::database::CacheSynchronizer;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Journey progress access. Reads are hybrid; all progress writes go to the
/// remote source of truth and therefore require connectivity.
pub struct HybridProgressRepository {
    connectivity: Arc<dyn Connectivity>,
    remote: Arc<dyn RemoteProgressSource>,
    cache: ProgressCache,
    synchronizer: CacheSynchronizer,
}

impl HybridProgressRepository {
    pub fn new(
        connectivity: Arc<dyn Connectivity>,
        remote: Arc<dyn RemoteProgressSource>,
        cache: ProgressCache,
        synchronizer: CacheSynchronizer,
    ) -> Self {
        Self {
            connectivity,
            remote,
            cache,
            synchronizer,
        }
    }

    async fn mirror(&self, progress: &JourneyProgress) {
        if let Err(e) = self.synchronizer.sync_progress(progress).await {
            warn!(
                user_id = %progress.user_id,
                journey_id = %progress.journey_id,
                "Progress cache sync failed: {}",
                e
            );
        }
    }
}

#[async_trait]
impl ProgressRepository for HybridProgressRepository {
    async fn progress_for(
        &self,
        user_id: &str,
        journey_id: &str,
    ) -> Result<Option<JourneyProgress>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_progress(user_id, journey_id).await {
                Ok(Some(progress)) => {
                    self.mirror(&progress).await;
                    return Ok(Some(progress));
                }
                Ok(None) => return Ok(None),
                Err(e) => {
                    debug!("Remote progress fetch failed, trying cache: {}", e);
                }
            }
        }

        self.cache.progress_for(user_id, journey_id).await
    }

    async fn start_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Journey start"));
        }
        let progress = self.remote.start_journey(user_id, journey_id).await?;
        self.mirror(&progress).await;
        Ok(progress)
    }

    async fn save_progress(&self, progress: &JourneyProgress) -> Result<()> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Journey progress update"));
        }
        self.remote.save_progress(progress).await?;
        self.mirror(progress).await;
        Ok(())
    }

    async fn finish_journey(&self, user_id: &str, journey_id: &str) -> Result<JourneyProgress> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Journey finish"));
        }
        let progress = self.remote.finish_journey(user_id, journey_id).await?;
        self.mirror(&progress).await;
        Ok(progress)
    }
}
