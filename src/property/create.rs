//! The page and endpoint for adding a property.

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
    html::{FormTarget, form_page},
    property::{
        form::{PropertyForm, property_form},
        remote::add_property,
    },
    store::{Change, Mutation},
};

pub async fn get_new_property_page() -> Response {
    let form = property_form(
        &PropertyForm::new_property(),
        FormTarget::Create(endpoints::PROPERTIES_API),
    );

    form_page(
        "Add Property",
        endpoints::PROPERTIES_VIEW,
        "Add Property",
        &form,
    )
    .into_response()
}

/// Create a property and redirect to the properties page.
pub async fn create_property_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<PropertyForm>,
) -> Response {
    let property = match form.validate() {
        Ok(property) => property,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = add_property(&state.api, &session, &property).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Added property {}", property.name);
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Property(Change::Add))
        .await;

    (
        HxRedirect(endpoints::PROPERTIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
