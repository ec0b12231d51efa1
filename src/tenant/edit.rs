//! The page and endpoint for editing a tenant.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{FormTarget, form_page},
    property::remote::list_properties,
    record_id::RecordId,
    store::{Change, Mutation},
    tenant::{
        form::{TenantForm, tenant_form},
        remote::{get_renter, update_renter},
    },
};

/// Display the form for editing the tenant `tenant_id`.
pub async fn get_edit_tenant_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<RecordId>,
) -> Response {
    let (renter, properties) = match tokio::try_join!(
        get_renter(&state.api, &session, &tenant_id),
        list_properties(&state.api, &session)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::TENANT_API, &tenant_id);
    let form = tenant_form(
        &TenantForm::from_renter(&renter),
        &properties,
        FormTarget::Update(&update_url),
    );

    form_page("Edit Tenant", endpoints::TENANTS_VIEW, "Edit Tenant", &form).into_response()
}

/// Update the tenant `tenant_id` and redirect to the tenants page.
pub async fn update_tenant_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<RecordId>,
    Form(form): Form<TenantForm>,
) -> Response {
    let renter = match form.validate() {
        Ok(renter) => renter,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_renter(&state.api, &session, &tenant_id, &renter).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated tenant {tenant_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Tenant(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::TENANTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Form, Json, Router,
        extract::{Path, State},
        http::{Method, StatusCode},
        routing::{get, put},
    };
    use serde_json::json;

    use crate::{
        endpoints,
        record_id::RecordId,
        tenant::form::TenantForm,
        test_utils::{
            assert_form_input_with_value, assert_form_select, assert_hx_endpoint,
            assert_hx_redirect, assert_status, must_get_form, parse_html_document, remote_state,
            spawn_remote, test_session, with_dashboard_routes,
        },
    };

    use super::{get_edit_tenant_page, update_tenant_endpoint};

    fn router() -> Router {
        with_dashboard_routes(
            Router::new()
                .route(
                    "/api/admin/properties",
                    get(|| async { Json(json!([{"_id": "p1", "name": "Sunrise Apartments"}])) }),
                )
                .route(
                    "/api/admin/renter/{id}",
                    get(|| async {
                        Json(json!({
                            "_id": "t1",
                            "firstName": "Amina",
                            "lastName": "Otieno",
                            "phone": "+254700000001",
                            "property": "p1",
                            "paymentStatus": "Pending",
                            "activeStatus": "Active"
                        }))
                    }),
                )
                .route(
                    "/api/admin/updaterenter/{id}",
                    put(|| async { Json(json!({"message": "updated"})) }),
                ),
        )
    }

    #[tokio::test]
    async fn edit_page_is_filled_in() {
        let remote = spawn_remote(router()).await;

        let response = get_edit_tenant_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Path(RecordId::new("t1").unwrap()),
        )
        .await;

        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, "/api/tenants/t1", "hx-put");
        assert_form_input_with_value(&form, "firstName", "Amina");
        assert_form_select(&form, "property", "p1");
        assert_form_select(&form, "paymentStatus", "Pending");
    }

    #[tokio::test]
    async fn missing_tenant_is_not_found() {
        let remote = spawn_remote(Router::new()).await;

        let response = get_edit_tenant_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Path(RecordId::new("t404").unwrap()),
        )
        .await;

        assert_status(&response, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updates_tenant_as_json() {
        let remote = spawn_remote(router()).await;
        let form = TenantForm {
            first_name: "Amina".to_owned(),
            last_name: "Achieng".to_owned(),
            phone: "+254700000001".to_owned(),
            active_status: "Inactive".to_owned(),
            property: "p1".to_owned(),
            ..TenantForm::new_tenant()
        };

        let response = update_tenant_endpoint(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Path(RecordId::new("t1").unwrap()),
            Form(form),
        )
        .await;

        assert_hx_redirect(&response, endpoints::TENANTS_VIEW);
        let body = remote
            .log
            .last(Method::PUT, "/api/admin/updaterenter/t1")
            .json();
        assert_eq!(body["lastName"], "Achieng");
        assert_eq!(body["activeStatus"], "Inactive");
        assert_eq!(body["property"], "");
        assert_eq!(body["paymentStatus"], "Unpaid");
    }
}
