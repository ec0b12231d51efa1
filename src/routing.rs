//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_sign_up_page, post_log_in,
        post_sign_up,
    },
    dashboard::{get_dashboard_page, get_payments_summary},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        get_expenses_page, get_new_expense_page, update_expense_endpoint,
    },
    export::{export_expenses, export_payments, export_utilities},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    payment::{
        create_payment_endpoint, delete_payment_endpoint, get_edit_payment_page,
        get_new_payment_page, get_payments_page, update_payment_endpoint,
    },
    property::{
        create_property_endpoint, delete_property_endpoint, get_edit_property_page,
        get_new_property_page, get_properties_page, get_property_page, update_property_endpoint,
    },
    reminder::send_sms_reminder_endpoint,
    rental::{
        create_rental_endpoint, delete_rental_endpoint, get_edit_rental_page,
        get_new_rental_page, get_rental_page, get_rentals_page, update_rental_endpoint,
    },
    tenant::{
        create_tenant_endpoint, delete_tenant_endpoint, get_edit_tenant_page,
        get_new_tenant_page, get_tenants_page, update_tenant_endpoint,
    },
    utility::{
        create_utility_endpoint, delete_utility_endpoint, get_edit_utility_page,
        get_new_utility_page, get_utilities_page, update_utility_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::SIGN_UP_VIEW, get(get_sign_up_page))
        .route(endpoints::SIGN_UP_API, post(post_sign_up))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TENANTS_VIEW, get(get_tenants_page))
        .route(endpoints::NEW_TENANT_VIEW, get(get_new_tenant_page))
        .route(endpoints::EDIT_TENANT_VIEW, get(get_edit_tenant_page))
        .route(endpoints::PROPERTIES_VIEW, get(get_properties_page))
        .route(endpoints::NEW_PROPERTY_VIEW, get(get_new_property_page))
        .route(endpoints::PROPERTY_VIEW, get(get_property_page))
        .route(endpoints::EDIT_PROPERTY_VIEW, get(get_edit_property_page))
        .route(endpoints::RENTALS_VIEW, get(get_rentals_page))
        .route(endpoints::NEW_RENTAL_VIEW, get(get_new_rental_page))
        .route(endpoints::RENTAL_VIEW, get(get_rental_page))
        .route(endpoints::EDIT_RENTAL_VIEW, get(get_edit_rental_page))
        .route(endpoints::PAYMENTS_VIEW, get(get_payments_page))
        .route(endpoints::NEW_PAYMENT_VIEW, get(get_new_payment_page))
        .route(endpoints::EDIT_PAYMENT_VIEW, get(get_edit_payment_page))
        .route(endpoints::PAYMENTS_EXPORT, get(export_payments))
        .route(endpoints::UTILITIES_VIEW, get(get_utilities_page))
        .route(endpoints::NEW_UTILITY_VIEW, get(get_new_utility_page))
        .route(endpoints::EDIT_UTILITY_VIEW, get(get_edit_utility_page))
        .route(endpoints::UTILITIES_EXPORT, get(export_utilities))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::EXPENSES_EXPORT, get(export_expenses))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are called by htmx, which needs the HX-REDIRECT header for auth redirects.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::DASHBOARD_PAYMENTS_SUMMARY,
                get(get_payments_summary),
            )
            .route(endpoints::TENANTS_API, post(create_tenant_endpoint))
            .route(
                endpoints::TENANT_API,
                put(update_tenant_endpoint).delete(delete_tenant_endpoint),
            )
            .route(endpoints::PROPERTIES_API, post(create_property_endpoint))
            .route(
                endpoints::PROPERTY_API,
                put(update_property_endpoint).delete(delete_property_endpoint),
            )
            .route(endpoints::RENTALS_API, post(create_rental_endpoint))
            .route(
                endpoints::RENTAL_API,
                put(update_rental_endpoint).delete(delete_rental_endpoint),
            )
            .route(
                endpoints::RENTAL_SMS_REMINDER,
                post(send_sms_reminder_endpoint),
            )
            .route(endpoints::PAYMENTS_API, post(create_payment_endpoint))
            .route(
                endpoints::PAYMENT_API,
                put(update_payment_endpoint).delete(delete_payment_endpoint),
            )
            .route(endpoints::UTILITIES_API, post(create_utility_endpoint))
            .route(
                endpoints::UTILITY_API,
                put(update_utility_endpoint).delete(delete_utility_endpoint),
            )
            .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
            .route(
                endpoints::EXPENSE_API,
                put(update_expense_endpoint).delete(delete_expense_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, api::ApiClient, endpoints};

    use super::build_router;

    fn server() -> TestServer {
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1))
            .expect("Could not create API client");
        let state = AppState::new("foobar", "Etc/UTC", api, Duration::from_secs(60));

        TestServer::try_new(build_router(state)).expect("Could not create test server")
    }

    #[tokio::test]
    async fn pages_redirect_to_log_in_without_session() {
        let response = server().get(endpoints::RENTALS_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        assert!(
            location.to_str().unwrap().starts_with(endpoints::LOG_IN_VIEW),
            "want redirect to log in, got {location:?}"
        );
    }

    #[tokio::test]
    async fn htmx_endpoints_get_hx_redirect_without_session() {
        let response = server().delete("/api/payments/pay1").await;

        response.assert_status_ok();
        assert!(
            response
                .header("hx-redirect")
                .to_str()
                .unwrap()
                .starts_with(endpoints::LOG_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn log_in_page_is_public() {
        server().get(endpoints::LOG_IN_VIEW).await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        server()
            .get("/no/such/page")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
