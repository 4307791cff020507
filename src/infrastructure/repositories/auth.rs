use crate::application::mappers::map_user;
use crate::application::ports::connectivity::Connectivity;
use crate::application::ports::remote::RemoteAuthSource;
use crate::application::ports::repositories::{connectivity_required, AuthRepository};
use crate::domain::entities::User;
use crate::infrastructure::database::cache::UserCache;
use crate::infrastructure::database::CacheSynchronizer;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct HybridAuthRepository {
    connectivity: Arc<dyn Connectivity>,
    remote: Arc<dyn RemoteAuthSource>,
    cache: UserCache,
    synchronizer: CacheSynchronizer,
}

impl HybridAuthRepository {
    pub fn new(
        connectivity: Arc<dyn Connectivity>,
        remote: Arc<dyn RemoteAuthSource>,
        cache: UserCache,
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
impl AuthRepository for HybridAuthRepository {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Sign-in"));
        }

        let record = self.remote.sign_in(email, password).await?;
        if let Err(e) = self.synchronizer.sync_user(&record).await {
            warn!(user_id = %record.id, "User cache sync failed: {}", e);
        }
        map_user(&record)
    }

    async fn sign_out(&self, user_id: &str) -> Result<()> {
        if !self.connectivity.check_connection().await {
            return Err(connectivity_required("Sign-out"));
        }
        self.remote.sign_out(user_id).await
    }

    async fn current_user(&self, user_id: &str) -> Result<Option<User>> {
        if self.connectivity.check_connection().await {
            match self.remote.fetch_user(user_id).await {
                Ok(Some(record)) => {
                    if let Err(e) = self.synchronizer.sync_user(&record).await {
                        warn!(user_id = %record.id, "User cache sync failed: {}", e);
                    }
                    return map_user(&record).map(Some);
                }
                Ok(None) => return Ok(None),
                Err(e) => {
                    debug!("Remote user fetch failed, trying cache: {}", e);
                }
            }
        }

        self.cache.get_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::remote::RemoteUser;
    use crate::infrastructure::database::{CacheStore, ConnectionPool};
    use crate::shared::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticConnectivity(bool);

    #[async_trait]
    impl Connectivity for StaticConnectivity {
        async fn check_connection(&self) -> bool {
            self.0
        }

        fn is_online(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct MockRemote {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteAuthSource for MockRemote {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<RemoteUser> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RemoteUser {
                id: "u1".into(),
                name: "Ana".into(),
                email: email.to_string(),
                avatar_url: None,
            })
        }

        async fn sign_out(&self, _user_id: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn fetch_user(&self, user_id: &str) -> Result<Option<RemoteUser>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if user_id == "u1" {
                Ok(Some(RemoteUser {
                    id: "u1".into(),
                    name: "Ana".into(),
                    email: "ana@example.com".into(),
                    avatar_url: None,
                }))
            } else {
                Ok(None)
            }
        }
    }

    async fn repository(online: bool, remote: Arc<MockRemote>) -> HybridAuthRepository {
        let pool = ConnectionPool::in_memory().await.unwrap();
        let store = CacheStore::new(pool);
        store.initialize().await.unwrap();

        HybridAuthRepository::new(
            Arc::new(StaticConnectivity(online)),
            remote,
            UserCache::new(store.clone()),
            CacheSynchronizer::new(store),
        )
    }

    #[tokio::test]
    async fn test_sign_in_offline_fails_fast() {
        let remote = Arc::new(MockRemote::default());
        let repo = repository(false, remote.clone()).await;

        let result = repo.sign_in("ana@example.com", "trilha2024").await;
        assert!(matches!(result, Err(AppError::ConnectivityRequired(_))));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sign_in_mirrors_user_row() {
        let remote = Arc::new(MockRemote::default());
        let repo = repository(true, remote).await;

        let user = repo.sign_in("ana@example.com", "trilha2024").await.unwrap();
        assert_eq!(user.id, "u1");

        let cached = repo.cache.get_user("u1").await.unwrap();
        assert!(cached.is_some());
    }

    #[tokio::test]
    async fn test_current_user_offline_uses_cache() {
        let remote = Arc::new(MockRemote::default());

        // First session online mirrors the user, second session offline
        // still resolves identity.
        let pool = ConnectionPool::in_memory().await.unwrap();
        let store = CacheStore::new(pool);
        store.initialize().await.unwrap();

        let online = HybridAuthRepository::new(
            Arc::new(StaticConnectivity(true)),
            remote.clone(),
            UserCache::new(store.clone()),
            CacheSynchronizer::new(store.clone()),
        );
        online.current_user("u1").await.unwrap();

        let offline = HybridAuthRepository::new(
            Arc::new(StaticConnectivity(false)),
            remote.clone(),
            UserCache::new(store.clone()),
            CacheSynchronizer::new(store),
        );
        let calls_before = remote.calls.load(Ordering::SeqCst);
        let user = offline.current_user("u1").await.unwrap();

        assert!(user.is_some());
        assert_eq!(remote.calls.load(Ordering::SeqCst), calls_before);
    }
}
