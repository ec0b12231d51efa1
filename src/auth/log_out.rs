//! Log-out route handler that closes the session's dashboard store and clears its cookie.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    AppState,
    auth::session::{clear_session, load_session},
    endpoints,
    store::DashboardStores,
};

#[derive(Debug, Clone)]
pub struct LogOutState {
    pub cookie_key: Key,
    pub stores: DashboardStores,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            stores: state.stores.clone(),
        }
    }
}

impl FromRef<LogOutState> for Key {
    fn from_ref(state: &LogOutState) -> Self {
        state.cookie_key.clone()
    }
}

/// Stop the session's background polling, clear the session cookie and
/// redirect the client to the log-in page.
///
/// Works without a valid session so that expired sessions can still be cleared.
pub async fn get_log_out(State(state): State<LogOutState>, jar: PrivateCookieJar) -> Response {
    if let Ok(session) = load_session(&jar) {
        state.stores.remove(&session.token);
        tracing::info!("{} signed out", session.email);
    }

    (clear_session(jar), Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
