//! The endpoint for deleting a utility charge.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    app_state::RemoteState,
    auth::Session,
    record_id::RecordId,
    store::DeleteOutcome,
};

/// Delete the utility `utility_id` through the session's dashboard store.
///
/// The browser asks for confirmation with `hx-confirm` before sending the request.
pub async fn delete_utility_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(utility_id): Path<RecordId>,
) -> Response {
    let store = state.stores.get_or_load(&session).await;

    // The browser has already asked through `hx-confirm`, so the prompt is accepted here.
    // A store caller that asks on the server may get `Cancelled`.
    match store.delete_utility(&utility_id, |_| true).await {
        // The status code has to be 200 OK or htmx will not remove the table row.
        Ok(DeleteOutcome::Deleted) => Alert::SuccessSimple {
            message: "Utility deleted successfully".to_owned(),
        }
        .into_response(),
        Ok(DeleteOutcome::Cancelled) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => Error::from(error).into_alert_response(),
    }
}
