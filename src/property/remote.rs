//! Property requests to the remote API.

use reqwest::{Method, multipart::Form};

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    property::{Property, form::PropertyDraft},
    record_id::RecordId,
};

const PROPERTIES_PATH: &str = "/api/admin/properties";

pub async fn list_properties(
    api: &ApiClient,
    session: &Session,
) -> Result<Vec<Property>, ApiError> {
    api.get(PROPERTIES_PATH, Some(session)).await
}

pub async fn get_property(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Property, ApiError> {
    api.get(&format!("/api/admin/property/{id}"), Some(session))
        .await
}

pub async fn add_property(
    api: &ApiClient,
    session: &Session,
    property: &PropertyDraft,
) -> Result<(), ApiError> {
    api.submit_multipart(
        Method::POST,
        "/api/admin/addproperty",
        multipart(property),
        Some(session),
    )
    .await
}

pub async fn update_property(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    property: &PropertyDraft,
) -> Result<(), ApiError> {
    api.submit_multipart(
        Method::PUT,
        &format!("/api/admin/updateproperty/{id}"),
        multipart(property),
        Some(session),
    )
    .await
}

pub async fn delete_property(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("{PROPERTIES_PATH}/{id}"), Some(session))
        .await
}

fn multipart(property: &PropertyDraft) -> Form {
    Form::new()
        .text("name", property.name.clone())
        .text("type", property.kind.clone())
        .text("address", property.address.clone())
        .text("status", property.status.to_string())
        .text("rentalType", property.rental_type.to_string())
        .text("rentPaid", property.rent_paid.to_string())
        .text("description", property.description.clone())
}
