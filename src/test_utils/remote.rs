//! A stand-in for the remote rent-collection API.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Body,
    extract::Request,
    http::Method,
    middleware::{self, Next},
    routing::{delete, get},
};
use serde_json::{Value, json};

use crate::{api::ApiClient, app_state::RemoteState, auth::Session, store::DashboardStores};

/// A request received by a [FakeRemote].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// The body parsed as JSON, panics if it is not JSON.
    #[track_caller]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|error| panic!("request body {:?} is not JSON: {error}", self.body))
    }
}

/// Every request a [FakeRemote] has received, in arrival order.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

impl RequestLog {
    fn record(&self, request: RecordedRequest) {
        self.0.lock().unwrap().push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    /// The number of requests for `path`, with any method.
    pub fn calls(&self, path: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    /// The last request with `method` for `path`, panics if there is none.
    #[track_caller]
    pub fn last(&self, method: Method, path: &str) -> RecordedRequest {
        self.0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|request| request.method == method && request.path == path)
            .cloned()
            .unwrap_or_else(|| panic!("no {method} request for {path}"))
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub(crate) struct FakeRemote {
    pub base_url: String,
    pub log: RequestLog,
}

/// Serve `router` on a random local port and record every request it receives.
pub(crate) async fn spawn_remote(router: Router) -> FakeRemote {
    let log = RequestLog::default();
    let recorder = log.clone();

    let app = router.layer(middleware::from_fn(move |request: Request, next: Next| {
        let log = recorder.clone();

        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX)
                .await
                .expect("Could not read request body");

            log.record(RecordedRequest {
                method: parts.method.clone(),
                path: parts.uri.path().to_owned(),
                query: parts.uri.query().map(str::to_owned),
                authorization: parts
                    .headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned),
                body: String::from_utf8_lossy(&body).into_owned(),
            });

            next.run(Request::from_parts(parts, Body::from(body))).await
        }
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind fake remote API");
    let address = listener.local_addr().expect("Could not get local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fake remote API stopped");
    });

    FakeRemote {
        base_url: format!("http://{address}"),
        log,
    }
}

/// Handler state backed by `remote`, with dashboard stores in UTC.
pub(crate) fn remote_state(remote: &FakeRemote) -> RemoteState {
    let api = ApiClient::new(&remote.base_url, Duration::from_secs(5))
        .expect("Could not create API client");

    RemoteState {
        stores: DashboardStores::new(
            api.clone(),
            "Etc/UTC",
            Duration::from_secs(60),
            Duration::from_secs(3600),
        ),
        api,
        local_timezone: "Etc/UTC".to_owned(),
    }
}

pub(crate) fn test_session(token: &str) -> Session {
    Session {
        name: "Jane Wanjiru".to_owned(),
        email: "jane@example.com".to_owned(),
        token: token.to_owned(),
        role: "Admin".to_owned(),
        id: Some("u1".to_owned()),
        is_admin: Some(true),
    }
}

/// A rental for Amina Otieno at Sunrise Apartments, KES 15,000 a month.
pub(crate) fn rental_json(id: &str, dues: f64) -> Value {
    let payment_status = if dues > 0.0 { "Overdue" } else { "Paid" };

    json!({
        "_id": id,
        "property": {"_id": "p1", "name": "Sunrise Apartments"},
        "renter": {
            "_id": "t1",
            "firstName": "Amina",
            "lastName": "Otieno",
            "email": "amina@example.com",
            "phone": "+254700000001",
            "paymentStatus": payment_status,
            "activeStatus": "Active"
        },
        "amount": 15000,
        "deposit": 15000,
        "status": "Rented",
        "rentalStartDate": "2025-01-01T00:00:00.000Z",
        "rentalEndDate": "2025-12-31T00:00:00.000Z",
        "paidAmount": 15000.0 - dues,
        "dues": dues,
        "deadline": "2025-03-05T00:00:00.000Z",
        "utilitiesTotal": 500,
        "utilityPaidAmount": 0,
        "rentalFrequency": "Monthly",
        "description": "Ground floor",
        "utilities": [{"type": "Water", "amount": 500}]
    })
}

/// Routes for every resource a [crate::store::DashboardStore] fetches, plus
/// payment and utility deletes that succeed.
pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/dashboard/summary",
            get(|| async {
                Json(json!({
                    "totalRenters": 4,
                    "totalProperties": 3,
                    "totalEarnings": 120000,
                    "overdueCount": 1
                }))
            }),
        )
        .route(
            "/api/admin/dashboard/chartsummary",
            get(|| async {
                Json(json!({
                    "earnings": 50000,
                    "expenses": 10000,
                    "utilities": 5000,
                    "overdues": 2000,
                    "deposits": 15000
                }))
            }),
        )
        .route(
            "/api/admin/payments/summary",
            get(|| async { Json(json!({"earnings": 30000, "pastDue": 2000})) }),
        )
        .route(
            "/api/admin/rentals",
            get(|| async { Json(json!([rental_json("r1", 0.0), rental_json("r2", 1500.0)])) }),
        )
        .route(
            "/api/admin/payment/{id}",
            delete(|| async { Json(json!({"message": "Payment deleted"})) }),
        )
        .route(
            "/api/admin/utility/{id}",
            delete(|| async { Json(json!({"message": "Utility deleted"})) }),
        )
}

/// `overrides` with [dashboard_routes] serving every path it does not define.
pub(crate) fn with_dashboard_routes(overrides: Router) -> Router {
    overrides.fallback_service(dashboard_routes())
}
