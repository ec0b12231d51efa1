//! The dashboard stores of every signed-in session.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use tokio::time::MissedTickBehavior;

use crate::{
    api::ApiClient,
    auth::Session,
    store::{DashboardStore, task_scope::TaskScope},
};

type StoreMap = Mutex<HashMap<String, Entry>>;

struct Entry {
    store: Arc<DashboardStore>,
    last_used: Instant,
}

/// Dashboard stores keyed by the session's bearer token. Cheap to clone.
#[derive(Clone)]
pub struct DashboardStores {
    stores: Arc<StoreMap>,
    /// Runs the idle sweep. Dropping the last clone of the registry stops it.
    sweeper: Arc<TaskScope>,
    sweeping: Arc<AtomicBool>,
    api: ApiClient,
    local_timezone: String,
    poll_interval: Duration,
    idle_timeout: Duration,
}

impl DashboardStores {
    /// Create an empty registry.
    ///
    /// New stores poll for rentals every `poll_interval`. Stores that have not
    /// been used for `idle_timeout` are closed and evicted by a background sweep,
    /// which starts with the first store.
    pub fn new(
        api: ApiClient,
        local_timezone: &str,
        poll_interval: Duration,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            stores: Arc::new(Mutex::new(HashMap::new())),
            sweeper: Arc::new(TaskScope::new()),
            sweeping: Arc::new(AtomicBool::new(false)),
            api,
            local_timezone: local_timezone.to_owned(),
            poll_interval,
            idle_timeout,
        }
    }

    /// The store for `session`, creating and loading it if it does not exist.
    pub async fn get_or_load(&self, session: &Session) -> Arc<DashboardStore> {
        if let Some(store) = self.get(&session.token) {
            return store;
        }

        let store = Arc::new(DashboardStore::new(
            self.api.clone(),
            session.clone(),
            &self.local_timezone,
        ));
        store.load().await;

        self.start_sweeping();
        let mut stores = self.lock();
        evict_idle(&mut stores, self.idle_timeout);

        // Another request for the same session may have finished loading first.
        if let Some(entry) = stores.get_mut(&session.token) {
            store.close();
            entry.last_used = Instant::now();
            return entry.store.clone();
        }

        store.start_polling(self.poll_interval);
        stores.insert(
            session.token.clone(),
            Entry {
                store: store.clone(),
                last_used: Instant::now(),
            },
        );
        tracing::debug!("Created a dashboard store for {}", session.email);

        store
    }

    /// Close and forget the store for `token`, if there is one.
    pub fn remove(&self, token: &str) {
        if let Some(entry) = self.lock().remove(token) {
            entry.store.close();
            tracing::debug!(
                "Closed the dashboard store for {}",
                entry.store.session().email
            );
        }
    }

    /// The number of open stores.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn get(&self, token: &str) -> Option<Arc<DashboardStore>> {
        let mut stores = self.lock();
        let entry = stores.get_mut(token)?;
        entry.last_used = Instant::now();

        Some(entry.store.clone())
    }

    /// Evict idle stores periodically so an abandoned session stops polling
    /// even when no one else signs in.
    fn start_sweeping(&self) {
        if self.sweeping.swap(true, Ordering::SeqCst) {
            return;
        }

        let stores: Weak<StoreMap> = Arc::downgrade(&self.stores);
        let idle_timeout = self.idle_timeout;
        let period = idle_timeout.min(self.poll_interval);

        self.sweeper.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(stores) = stores.upgrade() else {
                    break;
                };
                let mut stores = stores.lock().unwrap_or_else(PoisonError::into_inner);
                evict_idle(&mut stores, idle_timeout);
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_idle(stores: &mut HashMap<String, Entry>, idle_timeout: Duration) {
    stores.retain(|_, entry| {
        let idle = entry.last_used.elapsed() > idle_timeout;

        if idle {
            entry.store.close();
            tracing::debug!(
                "Evicted the idle dashboard store for {}",
                entry.store.session().email
            );
        }

        !idle
    });
}

impl std::fmt::Debug for DashboardStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStores")
            .field("stores", &self.len())
            .field("local_timezone", &self.local_timezone)
            .field("poll_interval", &self.poll_interval)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}
