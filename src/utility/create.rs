//! The page and endpoint for adding a utility charge.

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints,
    html::{FormTarget, form_page},
    payment::NewLedgerEntryQuery,
    rental::{rental_options, remote::get_rental},
    store::{Change, Mutation},
    timezone::local_today,
    utility::{
        form::{UtilityForm, utility_form},
        remote::add_utility,
    },
};

pub async fn get_new_utility_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Query(query): Query<NewLedgerEntryQuery>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };
    let snapshot = state.stores.get_or_load(&session).await.snapshot();
    let rentals = rental_options(&snapshot.rentals);

    let form = utility_form(
        &UtilityForm::new_utility(&query.rental_id, today),
        Some(&rentals),
        FormTarget::Create(endpoints::UTILITIES_API),
    );

    form_page("Add Utility", endpoints::UTILITIES_VIEW, "Add Utility", &form).into_response()
}

/// Record a utility charge against the chosen rental, labelled with the rental's property.
pub async fn create_utility_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<UtilityForm>,
) -> Response {
    let rental_id = match form.rental_id() {
        Ok(rental_id) => rental_id,
        Err(error) => return error.into_alert_response(),
    };
    let mut utility = match form.validate() {
        Ok(utility) => utility,
        Err(error) => return error.into_alert_response(),
    };

    let rental = match get_rental(&state.api, &session, &rental_id).await {
        Ok(rental) => rental,
        Err(error) => return Error::from(error).into_alert_response(),
    };
    utility.property = rental.property.name;

    if let Err(error) = add_utility(&state.api, &session, &rental_id, &utility).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Added a {} charge to rental {rental_id}", utility.kind);
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Utility(Change::Add))
        .await;

    (
        HxRedirect(endpoints::UTILITIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
