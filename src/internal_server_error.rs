//! The page shown when a request fails for reasons the user cannot fix from the form.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{ApiError, html::error_view};

/// A 500 page with a short description and a hint about what to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalServerError {
    pub description: String,
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }
}

impl InternalServerError {
    /// The remote API failed while loading a page.
    pub fn remote(error: &ApiError) -> Self {
        Self {
            description: "Could not load your data".to_owned(),
            fix: error.user_message(),
        }
    }

    /// The server was started with a timezone that cannot be resolved.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self {
            description: "Invalid Timezone Settings".to_owned(),
            fix: format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
        }
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", &self.description, &self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// The page htmx handlers redirect to when they cannot render an alert.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
