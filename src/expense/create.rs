//! The page and endpoint for recording an expense.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints,
    expense::{
        form::{ExpenseForm, expense_form},
        remote::add_expense,
    },
    html::{FormTarget, form_page},
    property::remote::list_properties,
    store::{Change, Mutation},
    tenant::remote::list_renters,
    timezone::local_today,
};

pub async fn get_new_expense_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };
    let (properties, renters) = match tokio::try_join!(
        list_properties(&state.api, &session),
        list_renters(&state.api, &session)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Error::from(error).into_response(),
    };

    let form = expense_form(
        &ExpenseForm::new_expense(today),
        &properties,
        &renters,
        FormTarget::Create(endpoints::EXPENSES_API),
    );

    form_page("Add Expense", endpoints::EXPENSES_VIEW, "Add Expense", &form).into_response()
}

pub async fn create_expense_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match form.validate() {
        Ok(expense) => expense,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = add_expense(&state.api, &session, &expense).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Added a {} expense for property {}", expense.kind, expense.property);
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Expense(Change::Add))
        .await;

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
