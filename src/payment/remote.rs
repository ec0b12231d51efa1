//! Payment requests to the remote API.

use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    payment::{Payment, form::PaymentDraft},
    record_id::RecordId,
};

pub async fn list_payments(api: &ApiClient, session: &Session) -> Result<Vec<Payment>, ApiError> {
    api.get("/api/admin/payments", Some(session)).await
}

pub async fn get_payment(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Payment, ApiError> {
    api.get(&format!("/api/admin/payment/{id}"), Some(session))
        .await
}

/// Record a payment against the rental `rental_id`.
pub async fn add_payment(
    api: &ApiClient,
    session: &Session,
    rental_id: &RecordId,
    payment: &PaymentDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::POST,
        &format!("/api/admin/payment/{rental_id}"),
        payment,
        Some(session),
    )
    .await
}

pub async fn update_payment(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    payment: &PaymentDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::PUT,
        &format!("/api/admin/updatepayment/{id}"),
        payment,
        Some(session),
    )
    .await
}

pub async fn delete_payment(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("/api/admin/payment/{id}"), Some(session))
        .await
}
