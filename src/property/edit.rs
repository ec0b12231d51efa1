//! The page and endpoint for editing a property.

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
    property::{
        form::{PropertyForm, property_form},
        remote::{get_property, update_property},
    },
    record_id::RecordId,
    store::{Change, Mutation},
};

pub async fn get_edit_property_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(property_id): Path<RecordId>,
) -> Response {
    let property = match get_property(&state.api, &session, &property_id).await {
        Ok(property) => property,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::PROPERTY_API, &property_id);
    let form = property_form(
        &PropertyForm::from_property(&property),
        FormTarget::Update(&update_url),
    );

    form_page(
        "Edit Property",
        endpoints::PROPERTIES_VIEW,
        "Edit Property",
        &form,
    )
    .into_response()
}

/// Update the property `property_id` and redirect to the properties page.
pub async fn update_property_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(property_id): Path<RecordId>,
    Form(form): Form<PropertyForm>,
) -> Response {
    let property = match form.validate() {
        Ok(property) => property,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_property(&state.api, &session, &property_id, &property).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated property {property_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Property(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::PROPERTIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
