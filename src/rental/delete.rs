//! The endpoint for deleting a rental.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    app_state::RemoteState,
    auth::Session,
    record_id::RecordId,
    rental::remote::delete_rental,
    store::{Change, Mutation},
};

pub async fn delete_rental_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(rental_id): Path<RecordId>,
) -> Response {
    if let Err(error) = delete_rental(&state.api, &session, &rental_id).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Deleted rental {rental_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Rental(Change::Delete))
        .await;

    // The status code has to be 200 OK or htmx will not remove the table row.
    Alert::SuccessSimple {
        message: "Rental deleted successfully".to_owned(),
    }
    .into_response()
}
