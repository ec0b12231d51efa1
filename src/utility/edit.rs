//! The page and endpoint for editing a utility charge.

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
    record_id::RecordId,
    store::{Change, Mutation},
    utility::{
        form::{UtilityForm, utility_form},
        remote::{get_utility, update_utility},
    },
};

pub async fn get_edit_utility_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(utility_id): Path<RecordId>,
) -> Response {
    let utility = match get_utility(&state.api, &session, &utility_id).await {
        Ok(utility) => utility,
        Err(error) => return Error::from(error).into_response(),
    };

    let update_url = format_endpoint(endpoints::UTILITY_API, &utility_id);
    let form = utility_form(
        &UtilityForm::from_utility(&utility),
        None,
        FormTarget::Update(&update_url),
    );

    form_page(
        "Edit Utility",
        endpoints::UTILITIES_VIEW,
        "Edit Utility",
        &form,
    )
    .into_response()
}

pub async fn update_utility_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(utility_id): Path<RecordId>,
    Form(form): Form<UtilityForm>,
) -> Response {
    let utility = match form.validate() {
        Ok(utility) => utility,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_utility(&state.api, &session, &utility_id, &utility).await {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Updated utility {utility_id}");
    state
        .stores
        .get_or_load(&session)
        .await
        .after_mutation(Mutation::Utility(Change::Edit))
        .await;

    (
        HxRedirect(endpoints::UTILITIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Form, Json, Router,
        extract::{Path, State},
        http::Method,
        routing::{get, put},
    };
    use serde_json::json;

    use crate::{
        endpoints,
        record_id::RecordId,
        test_utils::{
            assert_form_input_with_value, assert_form_select, assert_hx_endpoint,
            assert_hx_redirect, must_get_form, parse_html_document, remote_state, spawn_remote,
            test_session, with_dashboard_routes,
        },
        utility::form::UtilityForm,
    };

    use super::{get_edit_utility_page, update_utility_endpoint};

    fn router() -> Router {
        with_dashboard_routes(
            Router::new()
                .route(
                    "/api/admin/utility/{id}",
                    get(|| async {
                        Json(json!({
                            "_id": "u1",
                            "type": "Water",
                            "amount": 500,
                            "date": "2025-03-01",
                            "property": {"_id": "p1", "name": "Sunrise Apartments"}
                        }))
                    }),
                )
                .route(
                    "/api/admin/updateutility/{id}",
                    put(|| async { Json(json!({"message": "updated"})) }),
                ),
        )
    }

    #[tokio::test]
    async fn edit_page_is_filled_in() {
        let remote = spawn_remote(router()).await;

        let response = get_edit_utility_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Path(RecordId::new("u1").unwrap()),
        )
        .await;

        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, "/api/utilities/u1", "hx-put");
        assert_form_select(&form, "type", "Water");
        assert_form_input_with_value(&form, "amount", "500");
        assert_form_input_with_value(&form, "property", "Sunrise Apartments");
    }

    #[tokio::test]
    async fn updates_utility() {
        let remote = spawn_remote(router()).await;
        let form = UtilityForm {
            kind: "Water".to_owned(),
            amount: "650".to_owned(),
            date: "2025-03-01".to_owned(),
            property: "Sunrise Apartments".to_owned(),
            ..Default::default()
        };

        let response = update_utility_endpoint(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Path(RecordId::new("u1").unwrap()),
            Form(form),
        )
        .await;

        assert_hx_redirect(&response, endpoints::UTILITIES_VIEW);
        let body = remote
            .log
            .last(Method::PUT, "/api/admin/updateutility/u1")
            .json();
        assert_eq!(body["amount"], 650.0);
        assert_eq!(body["property"], "Sunrise Apartments");
    }
}
