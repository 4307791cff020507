use crate::application::mappers::map_journey;
use crate::application::ports::connectivity::Connectivity;
use crate::application::ports::remote::RemoteJourneySource;
use crate::application::ports::repositories::JourneyRepository;
use crate::domain::entities::Journey;
use crate::infrastructure::database::cache::JourneyCache;
use crate::infrastructure::database::CacheSynchronizer;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct HybridJourneyRepository {
    connectivity: Arc<dyn Connectivity>,
    remote: Arc<dyn RemoteJourneySource>,
    cache: JourneyCache,
    synchronizer: CacheSynchronizer,
}

impl HybridJourneyRepository {
    pub fn new(
        connectivity: Arc<dyn Connectivity>,
        remote: Arc<dyn RemoteJourneySource>,
        cache: JourneyCache,
        synchronizer: CacheSynchronizer,
    ) -> Self {
        Self {
            connectivity,
            remote,
            cache,
            synchronizer,
        }
    }
}

#[async_trait]
impl JourneyRepository for HybridJourneyRepository {
    async fn get_journey(&self, id: &str) -> Result<Option<Journey>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_journey(id).await {
                Ok(Some(record)) => {
                    if let Err(e) = self.synchronizer.sync_journey(&record).await {
                        warn!(journey_id = %record.id, "Journey cache sync failed: {}", e);
                    }
                    return map_journey(&record).map(Some);
                }
                Ok(None) => return Ok(None),
                Err(e) => {
                    debug!("Remote journey fetch failed, trying cache: {}", e);
                }
            }
        }

        self.cache.get_journey(id).await
    }

    async fn list_journeys(&self) -> Result<Vec<Journey>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_journeys().await {
                Ok(records) => {
                    let mut journeys = Vec::with_capacity(records.len());
                    for record in &records {
                        if let Err(e) = self.synchronizer.sync_journey(record).await {
                            warn!(journey_id = %record.id, "Journey cache sync failed: {}", e);
                        }
                        journeys.push(map_journey(record)?);
                    }
                    return Ok(journeys);
                }
                Err(e) => {
                    debug!("Remote journey list failed, trying cache: {}", e);
                }
            }
        }

        self.cache.list_journeys().await
    }
}
