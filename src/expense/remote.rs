//! Expense requests to the remote API.

use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError},
    auth::Session,
    expense::{Expense, form::ExpenseDraft},
    record_id::RecordId,
};

const EXPENSES_PATH: &str = "/api/admin/expenses";

pub async fn list_expenses(api: &ApiClient, session: &Session) -> Result<Vec<Expense>, ApiError> {
    api.get(EXPENSES_PATH, Some(session)).await
}

pub async fn get_expense(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<Expense, ApiError> {
    api.get(&format!("{EXPENSES_PATH}/{id}"), Some(session))
        .await
}

pub async fn add_expense(
    api: &ApiClient,
    session: &Session,
    expense: &ExpenseDraft,
) -> Result<(), ApiError> {
    api.submit_json(Method::POST, "/api/admin/addexpense", expense, Some(session))
        .await
}

pub async fn update_expense(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
    expense: &ExpenseDraft,
) -> Result<(), ApiError> {
    api.submit_json(
        Method::PUT,
        &format!("{EXPENSES_PATH}/{id}"),
        expense,
        Some(session),
    )
    .await
}

pub async fn delete_expense(
    api: &ApiClient,
    session: &Session,
    id: &RecordId,
) -> Result<(), ApiError> {
    api.delete(&format!("{EXPENSES_PATH}/{id}"), Some(session))
        .await
}
