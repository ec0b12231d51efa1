//! Rental requests to the remote API.

use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    record_id::RecordId,
    rental::{
        Rental,
        domain::RentalEnvelope,
        form::RentalDraft,
    },
};

const RENTALS_PATH: &str = "/api/admin/rentals";

pub async fn list_rentals(api: &ApiClient, session: &Session) -> Result<Vec<Rental>, ApiError> {
    api.get(RENTALS_PATH, Some(session)).await
}

/// Get a single rental, which the remote API wraps in a `rental` field.
pub async fn get_rental(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Rental, ApiError> {
    api.get::<RentalEnvelope>(&format!("{RENTALS_PATH}/{id}"), Some(session))
        .await
        .map(|envelope| envelope.rental)
}

pub async fn add_rental(
    api: &ApiClient,
    session: &Session,
    rental: &RentalDraft,
) -> Result<(), ApiError> {
    api.submit_json(Method::POST, "/api/admin/addrental", rental, Some(session))
        .await
}

pub async fn update_rental(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    rental: &RentalDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::PUT,
        &format!("/api/admin/updaterentals/{id}"),
        rental,
        Some(session),
    )
    .await
}

pub async fn delete_rental(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("{RENTALS_PATH}/{id}"), Some(session))
        .await
}
