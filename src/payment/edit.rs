//! The page and endpoint for editing a payment.

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
    html::{FormTarget, form_page},
    payment::{
        form::{PaymentForm, payment_form},
        remote::{get_payment, update_payment},
    },
    record_id::RecordId,
    store::{Change, Mutation},
};

pub async fn get_edit_payment_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(payment_id): Path<RecordId>,
) -> Response {
    let payment = match get_payment(&state.api, &session, &payment_id).await {
        Ok(payment) => payment,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::PAYMENT_API, &payment_id);
    let form = payment_form(
        &PaymentForm::from_payment(&payment),
        None,
        FormTarget::Update(&update_url),
    );

    form_page(
        "Edit Payment",
        endpoints::PAYMENTS_VIEW,
        "Edit Payment",
        &form,
    )
    .into_response()
}

pub async fn update_payment_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(payment_id): Path<RecordId>,
    Form(form): Form<PaymentForm>,
) -> Response {
    let payment = match form.validate() {
        Ok(payment) => payment,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_payment(&state.api, &session, &payment_id, &payment).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated payment {payment_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Payment(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::PAYMENTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
