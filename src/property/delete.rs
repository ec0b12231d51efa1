//! The endpoint for deleting a property.

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
    property::remote::delete_property,
    record_id::RecordId,
    store::{Change, Mutation},
};

pub async fn delete_property_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(property_id): Path<RecordId>,
) -> Response {
    if let Err(error) = delete_property(&state.api, &session, &property_id).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Deleted property {property_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Property(Change::Delete))
        .await;

    // The status code has to be 200 OK or htmx will not remove the table row.
    Alert::SuccessSimple {
        message: "Property deleted successfully".to_owned(),
    }
    .into_response()
}
