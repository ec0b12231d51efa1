//! The utility charges page.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    dates::format_day_month_year,
    endpoints::{self, format_endpoint},
    html::{
        TABLE_CELL_STYLE, TABLE_ROW_STYLE, data_table, format_currency, link, list_header, page,
        row_actions,
    },
    projections::total_amount,
    store::DELETE_UTILITY_PROMPT,
    utility::{Utility, remote::list_utilities},
};

pub async fn get_utilities_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    match list_utilities(&state.api, &session).await {
        Ok(utilities) => utilities_view(&utilities).into_response(),
        Err(error) => Error::from(error).into_response(),
    }
}

fn utilities_view(utilities: &[Utility]) -> Markup {
    let rows: Vec<Markup> = utilities.iter().map(utility_row).collect();
    let total = total_amount(utilities, |utility| utility.amount);

    let content = html! {
        (list_header("Utilities", endpoints::NEW_UTILITY_VIEW, "Add Utility"))

        div class="flex justify-between w-full mb-4"
        {
            p class="font-semibold" { "Total: " (format_currency(total)) }
            (link(endpoints::UTILITIES_EXPORT, "Download CSV"))
        }

        (data_table(
            &["Type", "Tenant", "Property", "Amount", "Date", "Description", "Actions"],
            &rows,
            "No utilities found."
        ))
    };

    page("Utilities", endpoints::UTILITIES_VIEW, &[], &content)
}

fn utility_row(utility: &Utility) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (utility.kind) }
            td class=(TABLE_CELL_STYLE) { (utility.renter.full_name()) }
            td class=(TABLE_CELL_STYLE) { (utility.property.display_name()) }
            td class=(TABLE_CELL_STYLE) { (format_currency(utility.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(date) = utility.date {
                    (format_day_month_year(date))
                }
            }
            td class=(TABLE_CELL_STYLE) { (utility.description) }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_UTILITY_VIEW, &utility.id),
                    &format_endpoint(endpoints::UTILITY_API, &utility.id),
                    DELETE_UTILITY_PROMPT,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::get};
    use serde_json::json;

    use crate::test_utils::{
        assert_status, assert_valid_html, parse_html_document, remote_state, spawn_remote,
        test_session,
    };

    use super::get_utilities_page;

    #[tokio::test]
    async fn lists_utilities() {
        let remote = spawn_remote(Router::new().route(
            "/api/admin/utilities",
            get(|| async {
                Json(json!([
                    {
                        "_id": "u1",
                        "type": "Water",
                        "renter": {"_id": "t1", "firstName": "Amina", "lastName": "Otieno"},
                        "property": {"_id": "p1", "name": "Sunrise Apartments"},
                        "amount": 500,
                        "date": "2025-03-01"
                    }
                ]))
            }),
        ))
        .await;

        let response =
            get_utilities_page(State(remote_state(&remote)), Extension(test_session("abc"))).await;

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let html = document.html();
        assert!(html.contains("Water"));
        assert!(html.contains("Total: KES 500.00"));
        assert!(html.contains("Are you sure you want to delete this utility?"));
    }

    #[tokio::test]
    async fn remote_failure_shows_error_page() {
        let remote = spawn_remote(Router::new().route(
            "/api/admin/utilities",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let response =
            get_utilities_page(State(remote_state(&remote)), Extension(test_session("abc"))).await;

        assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
