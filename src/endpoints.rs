//! The endpoint URIs served by this app.
//!
//! For endpoints that take a parameter, e.g., '/rentals/{rental_id}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in administrators.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The htmx partial for the payments summary on the dashboard.
pub const DASHBOARD_PAYMENTS_SUMMARY: &str = "/dashboard/payments_summary";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for getting the sign-up page.
pub const SIGN_UP_VIEW: &str = "/sign_up";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The page listing tenants.
pub const TENANTS_VIEW: &str = "/tenants";
/// The page for adding a tenant.
pub const NEW_TENANT_VIEW: &str = "/tenants/new";
/// The page for editing a tenant.
pub const EDIT_TENANT_VIEW: &str = "/tenants/{tenant_id}/edit";

/// The page listing properties.
pub const PROPERTIES_VIEW: &str = "/properties";
/// The page for adding a property.
pub const NEW_PROPERTY_VIEW: &str = "/properties/new";
/// The details of a single property.
pub const PROPERTY_VIEW: &str = "/properties/{property_id}";
/// The page for editing a property.
pub const EDIT_PROPERTY_VIEW: &str = "/properties/{property_id}/edit";

/// The page listing rentals.
pub const RENTALS_VIEW: &str = "/rentals";
/// The page for adding a rental.
pub const NEW_RENTAL_VIEW: &str = "/rentals/new";
/// The details of a single rental.
pub const RENTAL_VIEW: &str = "/rentals/{rental_id}";
/// The page for editing a rental.
pub const EDIT_RENTAL_VIEW: &str = "/rentals/{rental_id}/edit";

/// The page listing payments.
pub const PAYMENTS_VIEW: &str = "/payments";
/// The page for recording a payment.
pub const NEW_PAYMENT_VIEW: &str = "/payments/new";
/// The page for editing a payment.
pub const EDIT_PAYMENT_VIEW: &str = "/payments/{payment_id}/edit";
/// The CSV download of all payments.
pub const PAYMENTS_EXPORT: &str = "/payments/export.csv";

/// The page listing utilities.
pub const UTILITIES_VIEW: &str = "/utilities";
/// The page for recording a utility charge.
pub const NEW_UTILITY_VIEW: &str = "/utilities/new";
/// The page for editing a utility charge.
pub const EDIT_UTILITY_VIEW: &str = "/utilities/{utility_id}/edit";
/// The CSV download of all utilities.
pub const UTILITIES_EXPORT: &str = "/utilities/export.csv";

/// The page listing expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for recording an expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page for editing an expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The CSV download of all expenses.
pub const EXPENSES_EXPORT: &str = "/expenses/export.csv";

/// The route for logging in.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for creating an account.
pub const SIGN_UP_API: &str = "/api/sign_up";
/// The route for the client to log out the current administrator.
pub const LOG_OUT: &str = "/api/log_out";

/// The route to create a tenant.
pub const TENANTS_API: &str = "/api/tenants";
/// The route to update or delete a tenant.
pub const TENANT_API: &str = "/api/tenants/{tenant_id}";
/// The route to create a property.
pub const PROPERTIES_API: &str = "/api/properties";
/// The route to update or delete a property.
pub const PROPERTY_API: &str = "/api/properties/{property_id}";
/// The route to create a rental.
pub const RENTALS_API: &str = "/api/rentals";
/// The route to update or delete a rental.
pub const RENTAL_API: &str = "/api/rentals/{rental_id}";
/// The route to send a payment reminder to a rental's tenant by SMS.
pub const RENTAL_SMS_REMINDER: &str = "/api/rentals/{rental_id}/reminders/sms";
/// The route to record a payment.
pub const PAYMENTS_API: &str = "/api/payments";
/// The route to update or delete a payment.
pub const PAYMENT_API: &str = "/api/payments/{payment_id}";
/// The route to record a utility charge.
pub const UTILITIES_API: &str = "/api/utilities";
/// The route to update or delete a utility charge.
pub const UTILITY_API: &str = "/api/utilities/{utility_id}";
/// The route to record an expense.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to update or delete an expense.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{rental_id}' in '/rentals/{rental_id}'. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::DASHBOARD_VIEW,
            endpoints::DASHBOARD_PAYMENTS_SUMMARY,
            endpoints::LOG_IN_VIEW,
            endpoints::SIGN_UP_VIEW,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::STATIC,
            endpoints::TENANTS_VIEW,
            endpoints::NEW_TENANT_VIEW,
            endpoints::EDIT_TENANT_VIEW,
            endpoints::PROPERTIES_VIEW,
            endpoints::NEW_PROPERTY_VIEW,
            endpoints::PROPERTY_VIEW,
            endpoints::EDIT_PROPERTY_VIEW,
            endpoints::RENTALS_VIEW,
            endpoints::NEW_RENTAL_VIEW,
            endpoints::RENTAL_VIEW,
            endpoints::EDIT_RENTAL_VIEW,
            endpoints::PAYMENTS_VIEW,
            endpoints::NEW_PAYMENT_VIEW,
            endpoints::EDIT_PAYMENT_VIEW,
            endpoints::PAYMENTS_EXPORT,
            endpoints::UTILITIES_VIEW,
            endpoints::NEW_UTILITY_VIEW,
            endpoints::EDIT_UTILITY_VIEW,
            endpoints::UTILITIES_EXPORT,
            endpoints::EXPENSES_VIEW,
            endpoints::NEW_EXPENSE_VIEW,
            endpoints::EDIT_EXPENSE_VIEW,
            endpoints::EXPENSES_EXPORT,
            endpoints::LOG_IN_API,
            endpoints::SIGN_UP_API,
            endpoints::LOG_OUT,
            endpoints::TENANTS_API,
            endpoints::TENANT_API,
            endpoints::PROPERTIES_API,
            endpoints::PROPERTY_API,
            endpoints::RENTALS_API,
            endpoints::RENTAL_API,
            endpoints::RENTAL_SMS_REMINDER,
            endpoints::PAYMENTS_API,
            endpoints::PAYMENT_API,
            endpoints::UTILITIES_API,
            endpoints::UTILITY_API,
            endpoints::EXPENSES_API,
            endpoints::EXPENSE_API,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/rentals/{rental_id}", "66f1c0a2");

        assert_eq!(formatted_path, "/rentals/66f1c0a2");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/rentals", "r1");

        assert_eq!(formatted_path, "/rentals");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/api/rentals/{rental_id}/reminders/sms", "r1");

        assert_eq!(formatted_path, "/api/rentals/r1/reminders/sms");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
