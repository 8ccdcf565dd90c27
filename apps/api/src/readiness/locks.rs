use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-startup async locks.
///
/// Serializes the read-modify-write paths on one startup (assessment
/// persistence, task reconciliation, checklist recomputation) within this
/// process. The partial unique index on open task titles covers the rest.
#[derive(Clone, Default)]
pub struct StartupLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl StartupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `startup_id`. Released on guard drop.
    pub async fn acquire(&self, startup_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            // Entries nobody holds or waits on can go.
            map.retain(|id, lock| *id == startup_id || Arc::strong_count(lock) > 1);
            map.entry(startup_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}
