//! The page and endpoint for recording a payment.

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints,
    html::{FormTarget, form_page},
    payment::{
        form::{PaymentForm, payment_form},
        remote::add_payment,
    },
    rental::rental_options,
    store::{Change, Mutation},
    timezone::local_today,
};

/// The query for the new payment page, which may preselect a rental.
#[derive(Debug, Default, Deserialize)]
pub struct NewLedgerEntryQuery {
    #[serde(default)]
    pub rental_id: String,
}

pub async fn get_new_payment_page(
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

    let form = payment_form(
        &PaymentForm::new_payment(&query.rental_id, today),
        Some(&rentals),
        FormTarget::Create(endpoints::PAYMENTS_API),
    );

    form_page(
        "Record Payment",
        endpoints::PAYMENTS_VIEW,
        "Record Payment",
        &form,
    )
    .into_response()
}

pub async fn create_payment_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<PaymentForm>,
) -> Response {
    let rental_id = match form.rental_id() {
        Ok(rental_id) => rental_id,
        Err(error) => return error.into_alert_response(),
    };
    let payment = match form.validate() {
        Ok(payment) => payment,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = add_payment(&state.api, &session, &rental_id, &payment).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Recorded a payment for rental {rental_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Payment(Change::Add))
        .await;

    (
        HxRedirect(endpoints::PAYMENTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
