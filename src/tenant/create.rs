//! The page and endpoint for adding a tenant.

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
    property::remote::list_properties,
    store::{Change, Mutation},
    tenant::{
        form::{TenantForm, tenant_form},
        remote::add_renter,
    },
};

/// Display the form for adding a tenant.
pub async fn get_new_tenant_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let properties = match list_properties(&state.api, &session).await {
        Ok(properties) => properties,
        Err(error) => return Error::from(error).into_response(),
    };

    let mut form = TenantForm::new_tenant();
    if let Some(property) = properties.first() {
        form.property = property.id.to_string();
    }

    let form = tenant_form(
        &form,
        &properties,
        FormTarget::Create(endpoints::TENANTS_API),
    );

    form_page("Add Tenant", endpoints::TENANTS_VIEW, "Add Tenant", &form).into_response()
}

/// Create a tenant and redirect to the tenants page.
pub async fn create_tenant_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Form(form): Form<TenantForm>,
) -> Response {
    let renter = match form.validate() {
        Ok(renter) => renter,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = add_renter(&state.api, &session, &renter).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Added tenant {} {}", renter.first_name, renter.last_name);
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Tenant(Change::Add))
        .await;

    (
        HxRedirect(endpoints::TENANTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
