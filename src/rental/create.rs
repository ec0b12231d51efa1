//! The page and endpoint for adding a rental.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// The utility lines are repeated fields, which only axum_extra's Form can collect.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints,
    html::{FormTarget, form_page},
    property::remote::{get_property, list_properties},
    rental::{
        form::{RentalForm, rental_form},
        remote::add_rental,
    },
    store::{Change, Mutation},
    tenant::remote::list_renters,
};

pub async fn get_new_rental_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let (properties, renters) = match tokio::try_join!(
        list_properties(&state.api, &session),
        list_renters(&state.api, &session)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Error::from(error).into_response(),
    };

    let form = rental_form(
        &RentalForm::new_rental(),
        &properties,
        &renters,
        FormTarget::Create(endpoints::RENTALS_API),
    );

    form_page("Add Rental", endpoints::RENTALS_VIEW, "Add Rental", &form).into_response()
}

/// Create a rental once its rent and frequency agree with the chosen property.
pub async fn create_rental_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RentalForm>,
) -> Response {
    let rental = match form.validate() {
        Ok(rental) => rental,
        Err(error) => return error.into_alert_response(),
    };

    let property = match get_property(&state.api, &session, &rental.property).await {
        Ok(property) => property,
        Err(error) => return Error::from(error).into_alert_response(),
    };

    if let Err(error) = rental.check_against(&property) {
        return error.into_alert_response();
    }

    if let Err(error) = add_rental(&state.api, &session, &rental).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Added a rental of {} to {}", property.name, rental.renter);
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Rental(Change::Add))
        .await;

    (
        HxRedirect(endpoints::RENTALS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
