//! The page and endpoint for editing a rental.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{FormTarget, form_page},
    property::remote::list_properties,
    record_id::RecordId,
    rental::{
        form::{RentalForm, rental_form},
        remote::{get_rental, update_rental},
    },
    store::{Change, Mutation},
    tenant::remote::list_renters,
};

pub async fn get_edit_rental_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(rental_id): Path<RecordId>,
) -> Response {
    let (rental, properties, renters) = match tokio::try_join!(
        get_rental(&state.api, &session, &rental_id),
        list_properties(&state.api, &session),
        list_renters(&state.api, &session)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::RENTAL_API, &rental_id);
    let form = rental_form(
        &RentalForm::from_rental(&rental),
        &properties,
        &renters,
        FormTarget::Update(&update_url),
    );

    form_page("Edit Rental", endpoints::RENTALS_VIEW, "Edit Rental", &form).into_response()
}

pub async fn update_rental_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(rental_id): Path<RecordId>,
    Form(form): Form<RentalForm>,
) -> Response {
    let rental = match form.validate() {
        Ok(rental) => rental,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_rental(&state.api, &session, &rental_id, &rental).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated rental {rental_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Rental(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::RENTALS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
