use crate::application::ports::connectivity::{Connectivity, ConnectivityProbe};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Process-wide reachability state. The snapshot is written by the standing
/// subscription task and by `check_connection` polls, both on the cooperative
/// scheduler; the subscription lives for the process lifetime, so there is no
/// cancellation path.
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbe>,
    online: Arc<AtomicBool>,
}

impl ConnectivityMonitor {
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            probe,
            online: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribes to a push-style reachability signal and keeps the snapshot
    /// current.
    pub fn watch(&self, mut changes: watch::Receiver<bool>) {
        let online = Arc::clone(&self.online);
        tokio::spawn(async move {
            loop {
                let reachable = *changes.borrow_and_update();
                online.store(reachable, Ordering::SeqCst);
                debug!(reachable, "Connectivity change");
                if changes.changed().await.is_err() {
                    // Sender dropped; keep the last snapshot.
                    break;
                }
            }
        });
    }
}

#[async_trait]
impl Connectivity for ConnectivityMonitor {
    async fn check_connection(&self) -> bool {
        let reachable = match self.probe.probe().await {
            Ok(reachable) => reachable,
            Err(e) => {
                // Fail closed: an errored probe means offline.
                warn!("Connectivity probe failed: {}", e);
                false
            }
        };
        self.online.store(reachable, Ordering::SeqCst);
        reachable
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
