//! RentaHub is a web app for property administrators to manage tenants,
//! properties, rentals, payments, utilities and expenses.
//!
//! This library serves HTML pages directly and talks to the remote
//! rent-collection REST API on behalf of the signed-in administrator.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod balance;
mod dashboard;
mod dates;
mod endpoints;
mod expense;
mod export;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod payment;
mod projections;
mod property;
mod record_id;
mod remote_enum;
mod reminder;
mod rental;
mod routing;
mod store;
mod tenant;
mod timezone;
mod utility;
mod validation;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use app_state::AppState;
pub use balance::calculate_balance;
pub use routing::build_router;

use crate::{
    alert::Alert,
    html::error_view,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The session cookie is missing from the cookie jar in the request.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// The session cookie could not be decoded.
    #[error("the session cookie is malformed: {0}")]
    InvalidSessionCookie(String),

    /// The session cookie has expired.
    #[error("the session has expired")]
    SessionExpired,

    /// The session expiry could not be computed or formatted.
    #[error("could not set the session expiry: {0}")]
    SessionExpiry(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The user submitted a form that failed validation.
    ///
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// The user chose a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The requested resource was not found, either locally or on the remote API.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The remote API rejected the session's token.
    #[error("the remote API rejected the session")]
    Unauthorized,

    /// The remote API accepted the session but refused the request, e.g. for a role
    /// without permission. The message comes from the remote API.
    #[error("the remote API refused the request: {0}")]
    Forbidden(String),

    /// The remote API could not complete a request.
    #[error("remote API request failed: {0}")]
    Remote(ApiError),

    /// The data could not be written as CSV.
    #[error("could not write CSV: {0}")]
    Csv(String),
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND => Error::NotFound,
            ApiError::Status { status, .. } if status == StatusCode::UNAUTHORIZED => {
                Error::Unauthorized
            }
            ApiError::Status { status, message } if status == StatusCode::FORBIDDEN => {
                Error::Forbidden(message)
            }
            error => Error::Remote(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::Unauthorized => Redirect::to(endpoints::LOG_OUT).into_response(),
            Error::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Html(
                    error_view(
                        "Forbidden",
                        "403",
                        "You do not have permission to view this page.",
                        &message,
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError::invalid_timezone(&timezone).into_response()
            }
            Error::Remote(error) => {
                tracing::error!("A remote API request failed: {error}");
                InternalServerError::remote(&error).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::Validation(message) => Alert::Error {
                message: "Please check the form".to_owned(),
                details: message,
            }
            .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY),
            Error::TooWeak(message) => Alert::Error {
                message: "Password is too weak".to_owned(),
                details: message,
            }
            .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY),
            Error::NotFound => Alert::Error {
                message: "Not found".to_owned(),
                details: "The record could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::Unauthorized => (HxRedirect(endpoints::LOG_OUT.to_owned()), StatusCode::OK)
                .into_response(),
            Error::Forbidden(message) => Alert::Error {
                message: "Not allowed".to_owned(),
                details: message,
            }
            .into_response_with_status(StatusCode::FORBIDDEN),
            Error::Remote(error) => Alert::Error {
                message: "Request failed".to_owned(),
                details: error.user_message(),
            }
            .into_response_with_status(StatusCode::BAD_GATEWAY),
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
