//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    api::ApiClient,
    auth::{DEFAULT_COOKIE_DURATION, REMEMBER_ME_COOKIE_DURATION},
    store::DashboardStores,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Africa/Nairobi".
    pub local_timezone: String,

    /// The client for the remote rent-collection API.
    pub api: ApiClient,

    /// The cached dashboard data of each signed-in session.
    pub stores: DashboardStores,
}

impl AppState {
    /// Create the server state.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Africa/Nairobi".
    /// Each session's rentals are refreshed from the remote API every `poll_interval`.
    pub fn new(
        cookie_secret: &str,
        local_timezone: &str,
        api: ApiClient,
        poll_interval: std::time::Duration,
    ) -> Self {
        // No session outlives a remember-me cookie, so neither should its store.
        let stores = DashboardStores::new(
            api.clone(),
            local_timezone,
            poll_interval,
            REMEMBER_ME_COOKIE_DURATION.unsigned_abs(),
        );

        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            api,
            stores,
        }
    }
}

/// The state shared by the handlers that read and write records on the remote API.
#[derive(Debug, Clone)]
pub struct RemoteState {
    pub api: ApiClient,
    pub stores: DashboardStores,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Nairobi".
    pub local_timezone: String,
}

impl FromRef<AppState> for RemoteState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            stores: state.stores.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
