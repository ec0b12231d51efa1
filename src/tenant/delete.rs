//! The endpoint for deleting a tenant.

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
    store::{Change, Mutation},
    tenant::remote::delete_renter,
};

/// Delete the tenant `tenant_id`, responding with an alert.
pub async fn delete_tenant_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<RecordId>,
) -> Response {
    if let Err(error) = delete_renter(&state.api, &session, &tenant_id).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Deleted tenant {tenant_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Tenant(Change::Delete))
        .await;

    // The status code has to be 200 OK or htmx will not remove the table row.
    Alert::SuccessSimple {
        message: "Renter deleted successfully".to_owned(),
    }
    .into_response()
}
