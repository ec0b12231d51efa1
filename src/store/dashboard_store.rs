//! The per-session cache of dashboard summaries and rentals.

use std::{
    collections::BTreeMap,
    future::Future,
    sync::{
        Arc, PoisonError, RwLock, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use time::OffsetDateTime;
use tokio::time::MissedTickBehavior;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    payment, rental,
    record_id::RecordId,
    rental::Rental,
    store::{
        Change, Mutation, Resource, ResourceSet, invalidated_by,
        summaries::{
            ChartSummary, DashboardSummary, PaymentsPeriod, PaymentsSummary,
            fetch_chart_summary, fetch_dashboard_summary, fetch_payments_summary,
        },
        task_scope::TaskScope,
    },
    timezone::local_today,
    utility,
};

/// The prompt shown before a payment is deleted.
pub const DELETE_PAYMENT_PROMPT: &str = "Are you sure you want to delete this payment?";
/// The prompt shown before a utility is deleted.
pub const DELETE_UTILITY_PROMPT: &str = "Are you sure you want to delete this utility?";

/// A copy of everything the store holds at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub dashboard_summary: DashboardSummary,
    pub chart_summary: ChartSummary,
    pub payments_summary: PaymentsSummary,
    /// The period of `payments_summary`, `None` until it has been fetched.
    pub payments_period: Option<PaymentsPeriod>,
    pub rentals: Vec<Rental>,
    /// The message of the last failed refresh of each resource.
    ///
    /// Cleared when the resource is next refreshed successfully.
    pub errors: BTreeMap<Resource, String>,
}

impl DashboardSnapshot {
    /// The error from the last refresh of `resource`, if it failed.
    pub fn error(&self, resource: Resource) -> Option<&str> {
        self.errors.get(&resource).map(String::as_str)
    }
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt and nothing was sent.
    Cancelled,
}

/// Caches the summaries shown on the dashboard for one signed-in session and
/// keeps them fresh after writes.
#[derive(Debug)]
pub struct DashboardStore {
    api: ApiClient,
    session: Session,
    local_timezone: String,
    state: RwLock<DashboardSnapshot>,
    closed: AtomicBool,
    tasks: TaskScope,
}

impl DashboardStore {
    /// Create an empty store. Call [DashboardStore::load] to fill it.
    pub fn new(api: ApiClient, session: Session, local_timezone: &str) -> Self {
        Self {
            api,
            session,
            local_timezone: local_timezone.to_owned(),
            state: RwLock::new(DashboardSnapshot::default()),
            closed: AtomicBool::new(false),
            tasks: TaskScope::new(),
        }
    }

    /// Fetch every resource concurrently.
    ///
    /// A failed fetch does not affect the others. Its error is recorded in the snapshot.
    pub async fn load(&self) {
        let period = self.current_period();

        let _ = tokio::join!(
            self.refresh_dashboard_summary(),
            self.refresh_chart_summary(),
            self.refresh_payments_summary(period),
            self.refresh_rentals(),
        );
    }

    pub async fn refresh_dashboard_summary(&self) -> Result<(), ApiError> {
        self.refresh(
            Resource::DashboardSummary,
            fetch_dashboard_summary(&self.api, &self.session),
            |state, summary| state.dashboard_summary = summary.clone(),
        )
        .await
        .map(drop)
    }

    pub async fn refresh_chart_summary(&self) -> Result<(), ApiError> {
        self.refresh(
            Resource::ChartSummary,
            fetch_chart_summary(&self.api, &self.session),
            |state, summary| state.chart_summary = summary.clone(),
        )
        .await
        .map(drop)
    }

    /// Fetch the payments summary for `period` and return it.
    ///
    /// Callers rendering `period` should use the returned summary rather than a later
    /// snapshot, which may hold another request's period.
    pub async fn refresh_payments_summary(
        &self,
        period: PaymentsPeriod,
    ) -> Result<PaymentsSummary, ApiError> {
        self.refresh(
            Resource::PaymentsSummary,
            fetch_payments_summary(&self.api, &self.session, period),
            |state, summary| {
                state.payments_summary = *summary;
                state.payments_period = Some(period);
            },
        )
        .await
    }

    pub async fn refresh_rentals(&self) -> Result<(), ApiError> {
        self.refresh(
            Resource::Rentals,
            rental::remote::list_rentals(&self.api, &self.session),
            |state, rentals| state.rentals.clone_from(rentals),
        )
        .await
        .map(drop)
    }

    /// Refresh `resources` one after the other in refresh order.
    ///
    /// The payments summary is fetched for the current month.
    pub async fn invalidate(&self, resources: &ResourceSet) {
        for resource in resources.iter() {
            // Failures are recorded in the snapshot by `refresh`.
            let _ = match resource {
                Resource::DashboardSummary => self.refresh_dashboard_summary().await,
                Resource::ChartSummary => self.refresh_chart_summary().await,
                Resource::PaymentsSummary => self
                    .refresh_payments_summary(self.current_period())
                    .await
                    .map(drop),
                Resource::Rentals => self.refresh_rentals().await,
            };
        }
    }

    /// Refresh the resources made stale by `mutation`.
    pub async fn after_mutation(&self, mutation: Mutation) {
        tracing::debug!("Refreshing the dashboard store after {mutation:?}");
        self.invalidate(&invalidated_by(mutation)).await;
    }

    /// Delete the payment `id` if `confirm` accepts the prompt.
    ///
    /// # Errors
    ///
    /// Returns the remote API's error if the delete failed. The snapshot is left unchanged.
    pub async fn delete_payment(
        &self,
        id: &RecordId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<DeleteOutcome, ApiError> {
        if !confirm(DELETE_PAYMENT_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        payment::remote::delete_payment(&self.api, &self.session, id).await?;
        self.after_mutation(Mutation::Payment(Change::Delete)).await;

        Ok(DeleteOutcome::Deleted)
    }

    /// Delete the utility `id` if `confirm` accepts the prompt.
    ///
    /// # Errors
    ///
    /// Returns the remote API's error if the delete failed. The snapshot is left unchanged.
    pub async fn delete_utility(
        &self,
        id: &RecordId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<DeleteOutcome, ApiError> {
        if !confirm(DELETE_UTILITY_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        utility::remote::delete_utility(&self.api, &self.session, id).await?;
        self.after_mutation(Mutation::Utility(Change::Delete)).await;

        Ok(DeleteOutcome::Deleted)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Refresh the rentals every `interval` until the store is closed or dropped.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) {
        let store = Arc::downgrade(self);

        self.tasks.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately and the store was just loaded.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let Some(store) = store.upgrade() else {
                    break;
                };

                if store.is_closed() {
                    break;
                }

                if store.refresh_rentals().await.is_err() {
                    tracing::debug!("Polling for rentals failed, trying again in {interval:?}");
                }
            }
        });
    }

    /// Stop background work. Responses that arrive afterwards are discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.tasks.shutdown();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The signed-in session this store fetches for.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn current_period(&self) -> PaymentsPeriod {
        let today = local_today(&self.local_timezone).unwrap_or_else(|error| {
            tracing::warn!("{error}, using the UTC date for the payments summary");
            OffsetDateTime::now_utc().date()
        });

        PaymentsPeriod::current_month(today)
    }

    /// Fetch `resource` and store it with `apply`. The fetched value is returned either way.
    async fn refresh<T>(
        &self,
        resource: Resource,
        fetch: impl Future<Output = Result<T, ApiError>>,
        apply: impl FnOnce(&mut DashboardSnapshot, &T),
    ) -> Result<T, ApiError> {
        let result = fetch.await;

        if self.is_closed() {
            tracing::debug!("Discarding the {resource} response because the store is closed");
            return result;
        }

        let mut state = self.write_state();

        match result {
            Ok(value) => {
                apply(&mut state, &value);
                state.errors.remove(&resource);
                tracing::debug!("Refreshed the {resource}");
                Ok(value)
            }
            Err(error) => {
                tracing::error!("Could not refresh the {resource}: {error}");
                state.errors.insert(resource, error.user_message());
                Err(error)
            }
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DashboardSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{delete, get},
    };
    use reqwest::Method;
    use serde_json::json;

    use crate::{
        api::ApiClient,
        record_id::RecordId,
        store::{
            Change, Mutation, Resource, ResourceSet,
            dashboard_store::{
                DELETE_PAYMENT_PROMPT, DELETE_UTILITY_PROMPT, DashboardStore, DeleteOutcome,
            },
        },
        test_utils::{
            FakeRemote, dashboard_routes, rental_json, spawn_remote, test_session,
            with_dashboard_routes,
        },
    };

    const SUMMARY_PATHS: [&str; 4] = [
        "/api/admin/dashboard/summary",
        "/api/admin/dashboard/chartsummary",
        "/api/admin/payments/summary",
        "/api/admin/rentals",
    ];

    async fn store_for(router: Router) -> (FakeRemote, Arc<DashboardStore>) {
        let remote = spawn_remote(router).await;
        let api = ApiClient::new(&remote.base_url, Duration::from_secs(5)).unwrap();
        let store = Arc::new(DashboardStore::new(api, test_session("abc"), "Etc/UTC"));

        (remote, store)
    }

    fn get_paths(remote: &FakeRemote) -> Vec<String> {
        remote
            .log
            .requests()
            .into_iter()
            .filter(|request| request.method == Method::GET)
            .map(|request| request.path)
            .collect()
    }

    #[tokio::test]
    async fn load_fills_every_resource() {
        let (remote, store) = store_for(dashboard_routes()).await;

        store.load().await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.dashboard_summary.total_renters, 4);
        assert_eq!(snapshot.chart_summary.earnings, 50_000.0);
        assert_eq!(snapshot.payments_summary.past_due, 2_000.0);
        assert_eq!(snapshot.rentals.len(), 2);
        assert!(snapshot.payments_period.is_some());
        assert!(snapshot.errors.is_empty());

        let mut paths = get_paths(&remote);
        paths.sort();
        let mut want = SUMMARY_PATHS.map(str::to_owned).to_vec();
        want.sort();
        assert_eq!(paths, want);
        assert!(
            remote
                .log
                .requests()
                .iter()
                .all(|request| request.authorization.as_deref() == Some("Bearer abc"))
        );
    }

    #[tokio::test]
    async fn a_failed_fetch_does_not_affect_the_others() {
        let router = with_dashboard_routes(Router::new().route(
            "/api/admin/dashboard/chartsummary",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Chart summary unavailable"})),
                )
            }),
        ));
        let (_remote, store) = store_for(router).await;

        store.load().await;

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.error(Resource::ChartSummary),
            Some("Chart summary unavailable")
        );
        assert_eq!(snapshot.chart_summary.earnings, 0.0);
        assert_eq!(snapshot.dashboard_summary.total_renters, 4);
        assert_eq!(snapshot.rentals.len(), 2);
        assert_eq!(snapshot.errors.len(), 1);
    }

    #[tokio::test]
    async fn a_failed_refresh_keeps_the_previous_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let router = with_dashboard_routes(Router::new().route(
            "/api/admin/rentals",
            get(move || {
                let call = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call == 0 {
                        (StatusCode::OK, Json(json!([rental_json("r1", 100.0)])))
                    } else {
                        (StatusCode::BAD_GATEWAY, Json(json!({"message": "Down"})))
                    }
                }
            }),
        ));
        let (_remote, store) = store_for(router).await;

        store.refresh_rentals().await.unwrap();
        let result = store.refresh_rentals().await;

        assert!(result.is_err());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.rentals.len(), 1);
        assert_eq!(snapshot.error(Resource::Rentals), Some("Down"));
    }

    #[tokio::test]
    async fn invalidate_refreshes_in_fixed_order() {
        let (remote, store) = store_for(dashboard_routes()).await;

        store
            .invalidate(&ResourceSet::of(&[
                Resource::Rentals,
                Resource::ChartSummary,
                Resource::DashboardSummary,
                Resource::PaymentsSummary,
            ]))
            .await;

        assert_eq!(get_paths(&remote), SUMMARY_PATHS.map(str::to_owned).to_vec());
    }

    #[tokio::test]
    async fn expense_writes_refresh_only_the_summaries() {
        let (remote, store) = store_for(dashboard_routes()).await;

        store.after_mutation(Mutation::Expense(Change::Edit)).await;

        assert_eq!(
            get_paths(&remote),
            vec![
                "/api/admin/dashboard/summary".to_owned(),
                "/api/admin/dashboard/chartsummary".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn delete_payment_cascades_once_in_order() {
        let (remote, store) = store_for(dashboard_routes()).await;
        let mut prompt = None;

        let outcome = store
            .delete_payment(&RecordId::new("pay1").unwrap(), |message| {
                prompt = Some(message.to_owned());
                true
            })
            .await;

        assert_eq!(outcome, Ok(DeleteOutcome::Deleted));
        assert_eq!(prompt.as_deref(), Some(DELETE_PAYMENT_PROMPT));
        let requests = remote.log.requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path, "/api/admin/payment/pay1");
        let refreshed: Vec<_> = requests[1..]
            .iter()
            .map(|request| request.path.clone())
            .collect();
        assert_eq!(refreshed, SUMMARY_PATHS.map(str::to_owned).to_vec());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let (remote, store) = store_for(dashboard_routes()).await;

        let outcome = store
            .delete_utility(&RecordId::new("u1").unwrap(), |message| {
                assert_eq!(message, DELETE_UTILITY_PROMPT);
                false
            })
            .await;

        assert_eq!(outcome, Ok(DeleteOutcome::Cancelled));
        assert!(remote.log.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_leaves_the_snapshot_unchanged() {
        let router = with_dashboard_routes(Router::new().route(
            "/api/admin/utility/{id}",
            delete(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Could not delete utility"})),
                )
            }),
        ));
        let (remote, store) = store_for(router).await;
        store.load().await;
        let before = store.snapshot();
        remote.log.clear();

        let result = store
            .delete_utility(&RecordId::new("u1").unwrap(), |_| true)
            .await;

        assert!(result.is_err());
        assert_eq!(store.snapshot(), before);
        assert_eq!(remote.log.requests().len(), 1);
    }

    #[tokio::test]
    async fn closed_store_discards_responses() {
        let (_remote, store) = store_for(dashboard_routes()).await;

        store.close();
        store.load().await;

        assert_eq!(store.snapshot(), Default::default());
    }

    #[tokio::test]
    async fn polling_refreshes_rentals_until_closed() {
        let (remote, store) = store_for(dashboard_routes()).await;

        store.start_polling(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(180)).await;
        store.close();
        let polled = remote.log.calls("/api/admin/rentals");
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(polled >= 2, "want at least 2 polls, got {polled}");
        assert_eq!(remote.log.calls("/api/admin/rentals"), polled);
        assert_eq!(store.snapshot().rentals.len(), 2);
    }
}
