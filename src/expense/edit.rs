//! The page and endpoint for editing an expense.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints::{self, format_endpoint},
    expense::{
        form::{ExpenseForm, expense_form},
        remote::{get_expense, update_expense},
    },
    html::{FormTarget, form_page},
    property::remote::list_properties,
    record_id::RecordId,
    store::{Change, Mutation},
    tenant::remote::list_renters,
};

pub async fn get_edit_expense_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(expense_id): Path<RecordId>,
) -> Response {
    let (expense, properties, renters) = match tokio::try_join!(
        get_expense(&state.api, &session, &expense_id),
        list_properties(&state.api, &session),
        list_renters(&state.api, &session)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::EXPENSE_API, &expense_id);
    let form = expense_form(
        &ExpenseForm::from_expense(&expense),
        &properties,
        &renters,
        FormTarget::Update(&update_url),
    );

    form_page("Edit Expense", endpoints::EXPENSES_VIEW, "Edit Expense", &form).into_response()
}

pub async fn update_expense_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(expense_id): Path<RecordId>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match form.validate() {
        Ok(expense) => expense,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_expense(&state.api, &session, &expense_id, &expense).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated expense {expense_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Expense(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
