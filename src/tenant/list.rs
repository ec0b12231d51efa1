//! The tenants page with its status filter.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{
        StatusFilter, TABLE_CELL_STYLE, TABLE_ROW_STYLE, badge, data_table, filter_links,
        list_header, page, row_actions,
    },
    projections::renters_with_status,
    tenant::{ActiveStatus, PaymentStatus, Renter, remote::list_renters},
};

pub const DELETE_TENANT_PROMPT: &str = "Are you sure you want to delete this renter?";

/// Display the tenants, optionally only those with the active status in `?status=`.
pub async fn get_tenants_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Query(filter): Query<StatusFilter>,
) -> Response {
    let renters = match list_renters(&state.api, &session).await {
        Ok(renters) => renters,
        Err(error) => return Error::from(error).into_response(),
    };

    let status = match filter.status.trim() {
        "" => None,
        status => Some(ActiveStatus::from_label(status)),
    };
    let shown = renters_with_status(&renters, status.as_ref());

    tenants_view(&shown, filter.status.trim()).into_response()
}

fn tenants_view(renters: &[&Renter], current_filter: &str) -> Markup {
    let filters = [
        ("", "All"),
        ("Active", "Active"),
        ("Past", "Past"),
        ("Inactive", "Inactive"),
    ];
    let rows: Vec<Markup> = renters.iter().map(|renter| tenant_row(renter)).collect();

    let content = html! {
        (list_header("Tenants", endpoints::NEW_TENANT_VIEW, "Add Tenant"))
        (filter_links(endpoints::TENANTS_VIEW, &filters, current_filter))
        (data_table(
            &["Name", "Phone", "Email", "Property", "Payment", "Status", "Actions"],
            &rows,
            "No tenants found."
        ))
    };

    page("Tenants", endpoints::TENANTS_VIEW, &[], &content)
}

fn tenant_row(renter: &Renter) -> Markup {
    let property = renter
        .property
        .as_ref()
        .map(|property| property.display_name())
        .unwrap_or("No property");

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (renter.full_name())
            }
            td class=(TABLE_CELL_STYLE) { (renter.phone) }
            td class=(TABLE_CELL_STYLE) { (renter.email) }
            td class=(TABLE_CELL_STYLE) { (property) }
            td class=(TABLE_CELL_STYLE)
            {
                (badge(renter.payment_status.as_str(), payment_status_colour(&renter.payment_status)))
            }
            td class=(TABLE_CELL_STYLE) { (renter.active_status) }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_TENANT_VIEW, &renter.id),
                    &format_endpoint(endpoints::TENANT_API, &renter.id),
                    DELETE_TENANT_PROMPT,
                ))
            }
        }
    }
}

/// The badge colours for a payment status.
pub fn payment_status_colour(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "bg-green-100 text-green-800",
        PaymentStatus::PartiallyPaid | PaymentStatus::Pending => "bg-yellow-100 text-yellow-800",
        PaymentStatus::Overdue => "bg-red-100 text-red-800",
        PaymentStatus::Unpaid | PaymentStatus::Other(_) => "bg-gray-100 text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Json, Router, extract::Query, extract::State, routing::get};
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        html::StatusFilter,
        test_utils::{
            assert_valid_html, parse_html_document, remote_state, spawn_remote, test_session,
        },
    };

    use super::get_tenants_page;

    fn renters_router() -> Router {
        Router::new().route(
            "/api/admin/renters",
            get(|| async {
                Json(json!([
                    {
                        "_id": "t1",
                        "firstName": "Amina",
                        "lastName": "Otieno",
                        "phone": "+254700000001",
                        "property": {"_id": "p1", "name": "Sunrise Apartments"},
                        "paymentStatus": "Paid",
                        "activeStatus": "Active"
                    },
                    {
                        "_id": "t2",
                        "firstName": "Brian",
                        "lastName": "Kamau",
                        "activeStatus": "Past"
                    }
                ]))
            }),
        )
    }

    #[tokio::test]
    async fn lists_tenants_with_bearer_token() {
        let remote = spawn_remote(renters_router()).await;

        let response = get_tenants_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(StatusFilter::default()),
        )
        .await;

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = Selector::parse("tbody tr").unwrap();
        assert_eq!(document.select(&rows).count(), 2);
        assert!(document.html().contains("Amina Otieno"));
        assert_eq!(
            remote.log.requests()[0].authorization.as_deref(),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn filters_by_status() {
        let remote = spawn_remote(renters_router()).await;

        let response = get_tenants_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(StatusFilter {
                status: "Past".to_owned(),
            }),
        )
        .await;

        let document = parse_html_document(response).await;
        let html = document.html();
        assert!(html.contains("Brian Kamau"));
        assert!(!html.contains("Amina Otieno"));
    }
}
