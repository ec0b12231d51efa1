//! The endpoint for deleting an expense.

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
    expense::remote::delete_expense,
    record_id::RecordId,
    store::{Change, Mutation},
};

pub async fn delete_expense_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(expense_id): Path<RecordId>,
) -> Response {
    if let Err(error) = delete_expense(&state.api, &session, &expense_id).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Deleted expense {expense_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Expense(Change::Delete))
        .await;

    // The status code has to be 200 OK or htmx will not remove the table row.
    Alert::SuccessSimple {
        message: "Expense deleted successfully.".to_owned(),
    }
    .into_response()
}
