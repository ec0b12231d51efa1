//! Utility charge requests to the remote API.

use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    record_id::RecordId,
    utility::{Utility, form::UtilityDraft},
};

pub async fn list_utilities(api: &ApiClient, session: &Session) -> Result<Vec<Utility>, ApiError> {
    api.get("/api/admin/utilities", Some(session)).await
}

pub async fn get_utility(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Utility, ApiError> {
    api.get(&format!("/api/admin/utility/{id}"), Some(session))
        .await
}

/// Record a utility charge against the rental `rental_id`.
pub async fn add_utility(
    api: &ApiClient,
    session: &Session,
    rental_id: &RecordId,
    utility: &UtilityDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::POST,
        &format!("/api/admin/addutility/{rental_id}"),
        utility,
        Some(session),
    )
    .await
}

pub async fn update_utility(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    utility: &UtilityDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::PUT,
        &format!("/api/admin/updateutility/{id}"),
        utility,
        Some(session),
    )
    .await
}

pub async fn delete_utility(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("/api/admin/utility/{id}"), Some(session))
        .await
}
