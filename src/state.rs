use std::sync::Arc;

use crate::application::ports::connectivity::ConnectivityProbe;
use crate::application::ports::remote::{
    RemoteAuthSource, RemoteCheckpointSource, RemoteJourneySource, RemoteProgressSource,
    RemoteValidationSink,
};
use crate::application::ports::repositories::ValidationStore;
use crate::application::services::{
    AuthService, CheckpointService, JourneyService, ValidationService,
};
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::infrastructure::database::cache::{
    CheckpointCache, JourneyCache, ProgressCache, UserCache, ValidationCache,
};
use crate::infrastructure::database::{CacheStore, CacheSynchronizer, ConnectionPool};
use crate::infrastructure::repositories::{
    HybridAuthRepository, HybridCheckpointRepository, HybridJourneyRepository,
    HybridProgressRepository,
};
use crate::shared::AppConfig;

/// Backend adapters injected by the app shell. Their implementations live
/// outside this crate.
pub struct RemoteSources {
    pub checkpoints: Arc<dyn RemoteCheckpointSource>,
    pub validations: Arc<dyn RemoteValidationSink>,
    pub journeys: Arc<dyn RemoteJourneySource>,
    pub progress: Arc<dyn RemoteProgressSource>,
    pub auth: Arc<dyn RemoteAuthSource>,
}

/// Composition root. Everything is constructed once here and passed by
/// reference; there are no lazily initialized process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub connectivity: Arc<ConnectivityMonitor>,
    pub cache_store: CacheStore,
    pub checkpoint_service: Arc<CheckpointService>,
    pub validation_service: Arc<ValidationService>,
    pub journey_service: Arc<JourneyService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub async fn new(
        config: &AppConfig,
        remotes: RemoteSources,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;

        let pool =
            ConnectionPool::new(&config.database.url, config.database.max_connections).await?;
        let cache_store = CacheStore::new(pool);
        cache_store.initialize().await?;

        let connectivity = Arc::new(ConnectivityMonitor::new(probe));
        let synchronizer = CacheSynchronizer::new(cache_store.clone());

        let checkpoint_repo = Arc::new(HybridCheckpointRepository::new(
            connectivity.clone(),
            remotes.checkpoints,
            remotes.validations,
            CheckpointCache::new(cache_store.clone()),
            ValidationCache::new(cache_store.clone()),
            synchronizer.clone(),
        ));
        let journey_repo = Arc::new(HybridJourneyRepository::new(
            connectivity.clone(),
            remotes.journeys,
            JourneyCache::new(cache_store.clone()),
            synchronizer.clone(),
        ));
        let progress_repo = Arc::new(HybridProgressRepository::new(
            connectivity.clone(),
            remotes.progress,
            ProgressCache::new(cache_store.clone()),
            synchronizer.clone(),
        ));
        let auth_repo = Arc::new(HybridAuthRepository::new(
            connectivity.clone(),
            remotes.auth,
            UserCache::new(cache_store.clone()),
            synchronizer,
        ));

        let validation_store: Arc<dyn ValidationStore> = checkpoint_repo.clone();
        let checkpoint_service = Arc::new(CheckpointService::new(checkpoint_repo.clone()));
        let validation_service = Arc::new(ValidationService::new(
            checkpoint_repo,
            Some(validation_store),
            config.validation.proximity_radius_meters,
        ));
        let journey_service = Arc::new(JourneyService::new(journey_repo, progress_repo));
        let auth_service = Arc::new(AuthService::new(auth_repo));

        Ok(Self {
            connectivity,
            cache_store,
            checkpoint_service,
            validation_service,
            journey_service,
            auth_service,
        })
    }
}
