use async_trait::async_trait;

/// Answers "can we reach the backend right now?". Consulted by every hybrid
/// repository before choosing between the remote and cached paths.
#[async_trait]
pub trait Connectivity: Send + Sync {
    /// On-demand reachability probe. Fails closed: any internal error reports
    /// offline.
    async fn check_connection(&self) -> bool;

    /// Last-known snapshot, kept current by the standing connectivity
    /// subscription and by `check_connection` polls.
    fn is_online(&self) -> bool;
}

/// Platform reachability signal behind the monitor. Implemented outside this
/// crate (OS network APIs, a ping endpoint, test stubs).
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> crate::shared::Result<bool>;
}
