//! The rentals page, read from the session's dashboard store.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    app_state::RemoteState,
    auth::Session,
    dates::format_day_month_year,
    endpoints::{self, format_endpoint},
    html::{
        StatusFilter, TABLE_CELL_STYLE, TABLE_ROW_STYLE, badge, data_table, filter_links,
        format_currency, link, list_header, load_error, page, row_actions,
    },
    projections::rentals_with_status,
    rental::{Rental, RentalStatus},
    store::Resource,
    tenant::PaymentStatus,
};

pub const DELETE_RENTAL_PROMPT: &str = "Are you sure you want to delete this rental?";

/// How a rental's rent stands, combining its dues with the tenant's payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentStanding {
    Paid,
    Overdue,
    Pending,
}

impl RentStanding {
    pub fn of(rental: &Rental) -> Self {
        let status = rental.renter.payment_status.as_ref();

        if rental.dues == 0.0 && status == Some(&PaymentStatus::Paid) {
            RentStanding::Paid
        } else if rental.dues > 0.0 && status == Some(&PaymentStatus::Overdue) {
            RentStanding::Overdue
        } else {
            RentStanding::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RentStanding::Paid => "Rent paid",
            RentStanding::Overdue => "Rent overdue",
            RentStanding::Pending => "Rent pending",
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            RentStanding::Paid => "bg-green-100 text-green-800",
            RentStanding::Overdue => "bg-red-100 text-red-800",
            RentStanding::Pending => "bg-yellow-100 text-yellow-800",
        }
    }
}

/// Display the current rentals, or past rentals with `?status=Past`.
pub async fn get_rentals_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Query(filter): Query<StatusFilter>,
) -> Response {
    let snapshot = state.stores.get_or_load(&session).await.snapshot();

    let status = match filter.status.trim() {
        "" => RentalStatus::Rented,
        status => RentalStatus::from_label(status),
    };
    let rentals = rentals_with_status(&snapshot.rentals, &status);

    rentals_view(
        &rentals,
        status.as_str(),
        snapshot.error(Resource::Rentals),
    )
    .into_response()
}

fn rentals_view(rentals: &[&Rental], current_filter: &str, error: Option<&str>) -> Markup {
    let filters = [("Rented", "Rented"), ("Past", "Past")];
    let rows: Vec<Markup> = rentals.iter().map(|rental| rental_row(rental)).collect();

    let content = html! {
        (list_header(
            &format!("Rentals ({})", rentals.len()),
            endpoints::NEW_RENTAL_VIEW,
            "Add Rental"
        ))
        (filter_links(endpoints::RENTALS_VIEW, &filters, current_filter))

        @if let Some(error) = error {
            (load_error(error))
        }

        (data_table(
            &["Tenant", "Property", "Rent", "Dues", "Deadline", "Standing", "Actions"],
            &rows,
            "No rentals found."
        ))
    };

    page("Rentals", endpoints::RENTALS_VIEW, &[], &content)
}

fn rental_row(rental: &Rental) -> Markup {
    let standing = RentStanding::of(rental);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (link(&format_endpoint(endpoints::RENTAL_VIEW, &rental.id), &rental.renter.full_name()))
            }
            td class=(TABLE_CELL_STYLE) { (rental.property.display_name()) }
            td class=(TABLE_CELL_STYLE)
            {
                (format_currency(rental.amount)) " / " (rental.rental_frequency)
            }
            td class=(TABLE_CELL_STYLE) { (format_currency(rental.dues)) }
            td class=(TABLE_CELL_STYLE)
            {
                @match rental.deadline {
                    Some(deadline) => (format_day_month_year(deadline)),
                    None => "-",
                }
            }
            td class=(TABLE_CELL_STYLE) { (badge(standing.label(), standing.colour())) }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_RENTAL_VIEW, &rental.id),
                    &format_endpoint(endpoints::RENTAL_API, &rental.id),
                    DELETE_RENTAL_PROMPT,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::Selector;

    use crate::{
        html::StatusFilter,
        rental::Rental,
        test_utils::{
            assert_valid_html, dashboard_routes, parse_html_document, remote_state, rental_json,
            spawn_remote, test_session, with_dashboard_routes,
        },
    };

    use super::{RentStanding, get_rentals_page};

    #[test]
    fn standing_combines_dues_and_status() {
        let paid: Rental = serde_json::from_value(rental_json("r1", 0.0)).unwrap();
        let overdue: Rental = serde_json::from_value(rental_json("r2", 1500.0)).unwrap();
        let mut pending = paid.clone();
        pending.dues = 200.0;

        assert_eq!(RentStanding::of(&paid), RentStanding::Paid);
        assert_eq!(RentStanding::of(&overdue), RentStanding::Overdue);
        assert_eq!(RentStanding::of(&pending), RentStanding::Pending);
    }

    #[tokio::test]
    async fn lists_current_rentals_from_the_store() {
        let remote = spawn_remote(dashboard_routes()).await;

        let response = get_rentals_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(StatusFilter::default()),
        )
        .await;

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = Selector::parse("tbody tr").unwrap();
        assert_eq!(document.select(&rows).count(), 2);
        let html = document.html();
        assert!(html.contains("Rentals (2)"));
        assert!(html.contains("Rent overdue"));
        assert!(html.contains("05-03-2025"));
    }

    #[tokio::test]
    async fn past_filter_hides_current_rentals() {
        let remote = spawn_remote(dashboard_routes()).await;

        let response = get_rentals_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(StatusFilter {
                status: "Past".to_owned(),
            }),
        )
        .await;

        let document = parse_html_document(response).await;
        assert!(document.html().contains("No rentals found."));
    }

    #[tokio::test]
    async fn shows_load_error_inline() {
        let remote = spawn_remote(with_dashboard_routes(Router::new().route(
            "/api/admin/rentals",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )))
        .await;

        let response = get_rentals_page(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(StatusFilter::default()),
        )
        .await;

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(document.html().contains("No rentals found."));
        let error = Selector::parse("p[role=status]").unwrap();
        assert!(document.select(&error).next().is_some());
    }
}
