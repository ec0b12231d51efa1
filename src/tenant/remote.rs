//! Tenant requests to the remote API, which calls tenants renters.

use reqwest::{Method, multipart::Form};

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    record_id::RecordId,
    tenant::{Renter, form::RenterDraft},
};

const RENTERS_PATH: &str = "/api/admin/renters";

pub async fn list_renters(api: &ApiClient, session: &Session) -> Result<Vec<Renter>, ApiError> {
    api.get(RENTERS_PATH, Some(session)).await
}

pub async fn get_renter(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Renter, ApiError> {
    api.get(&format!("/api/admin/renter/{id}"), Some(session))
        .await
}

/// Create a tenant. The remote API only accepts new tenants as multipart forms.
pub async fn add_renter(
    api: &ApiClient,
    session: &Session,
    renter: &RenterDraft,
) -> Result<(), ApiError> {
    let mut form = Form::new()
        .text("firstName", renter.first_name.clone())
        .text("lastName", renter.last_name.clone())
        .text("gender", renter.gender.clone())
        .text("phone", renter.phone.clone())
        .text("email", renter.email.clone())
        .text("paymentStatus", renter.payment_status.to_string())
        .text("activeStatus", renter.active_status.to_string());

    if let Some(property) = &renter.property {
        form = form.text("property", property.to_string());
    }

    api.submit_multipart(Method::POST, "/api/admin/addrenter", form, Some(session))
        .await
}

pub async fn update_renter(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    renter: &RenterDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::PUT,
        &format!("/api/admin/updaterenter/{id}"),
        renter,
        Some(session),
    )
    .await
}

pub async fn delete_renter(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("{RENTERS_PATH}/{id}"), Some(session))
        .await
}
