//! Transient success and error notifications.
//!
//! Every page has an empty `#alert-container` (see [crate::html::base]). Successful
//! htmx requests swap an alert into it out-of-band, while failed requests target it with
//! `hx-target-error`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// The ID of the element that alerts are placed in.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// The classes for the alert container. Shared with the out-of-band swap so the
/// container keeps its position after an alert is swapped in.
pub const ALERT_CONTAINER_STYLE: &str = "w-full max-w-md px-4 fixed bottom-24 lg:bottom-4 \
    left-1/2 -translate-x-1/2 z-50";

/// A message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded, with further details.
    Success {
        /// The headline.
        message: String,
        /// A sentence or two of context.
        details: String,
    },
    /// The action succeeded.
    SuccessSimple {
        /// The headline.
        message: String,
    },
    /// The action failed, with further details.
    Error {
        /// The headline.
        message: String,
        /// What went wrong and how to fix it.
        details: String,
    },
    /// The action failed.
    ErrorSimple {
        /// The headline.
        message: String,
    },
}

impl Alert {
    fn is_success(&self) -> bool {
        matches!(self, Alert::Success { .. } | Alert::SuccessSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::Success { message, .. }
            | Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Success { details, .. } | Alert::Error { details, .. } => {
                Some(details.as_str()).filter(|details| !details.is_empty())
            }
            Alert::SuccessSimple { .. } | Alert::ErrorSimple { .. } => None,
        }
    }

    /// Render the alert on its own, e.g. as the body of an error response.
    pub fn into_html(self) -> Markup {
        let colour = if self.is_success() {
            "text-green-800 bg-green-50 border-green-300 dark:bg-gray-800 \
                dark:text-green-400 dark:border-green-800"
        } else {
            "text-red-800 bg-red-50 border-red-300 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                role="alert"
                class={ "flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg shadow " (colour) }
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message()) }

                    @if let Some(details) = self.details() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold leading-none"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as a replacement for the alert container, for `hx-swap-oob`.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="true" class=(ALERT_CONTAINER_STYLE)
            {
                (self.into_html())
            }
        }
    }

    /// Respond with `status` and the bare alert markup.
    ///
    /// Used for failed requests, which htmx swaps into the element named by
    /// `hx-target-error`.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    /// Respond with 200 OK and the alert swapped out-of-band into the alert container.
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(self.into_oob_html().into_string())).into_response()
    }
}
