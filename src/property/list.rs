//! The properties page with its status filter.

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
        format_currency, link, list_header, page, row_actions,
    },
    projections::properties_with_status,
    property::{Property, PropertyStatus, remote::list_properties},
};

pub const DELETE_PROPERTY_PROMPT: &str = "Are you sure you want to delete this property?";

/// Display the properties, optionally only those with the status in `?status=`.
pub async fn get_properties_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Query(filter): Query<StatusFilter>,
) -> Response {
    let properties = match list_properties(&state.api, &session).await {
        Ok(properties) => properties,
        Err(error) => return Error::from(error).into_response(),
    };

    let status = match filter.status.trim() {
        "" => None,
        status => Some(PropertyStatus::from_label(status)),
    };
    let shown = properties_with_status(&properties, status.as_ref());

    properties_view(&shown, filter.status.trim()).into_response()
}

fn properties_view(properties: &[&Property], current_filter: &str) -> Markup {
    let filters = [
        ("", "All"),
        ("Rented", "Rented"),
        ("Vacant", "Vacant"),
        ("Under Maintenance", "Under Maintenance"),
    ];
    let rows: Vec<Markup> = properties
        .iter()
        .map(|property| property_row(property))
        .collect();

    let content = html! {
        (list_header("Properties", endpoints::NEW_PROPERTY_VIEW, "Add Property"))
        (filter_links(endpoints::PROPERTIES_VIEW, &filters, current_filter))
        (data_table(
            &["Name", "Type", "Address", "Rent", "Status", "Actions"],
            &rows,
            "No properties found."
        ))
    };

    page("Properties", endpoints::PROPERTIES_VIEW, &[], &content)
}

fn property_row(property: &Property) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (link(&format_endpoint(endpoints::PROPERTY_VIEW, &property.id), &property.name))
            }
            td class=(TABLE_CELL_STYLE) { (property.kind) }
            td class=(TABLE_CELL_STYLE) { (property.address) }
            td class=(TABLE_CELL_STYLE)
            {
                (format_currency(property.rent_paid)) " / " (property.rental_type)
            }
            td class=(TABLE_CELL_STYLE)
            {
                (badge(property.status.as_str(), property_status_colour(&property.status)))
            }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_PROPERTY_VIEW, &property.id),
                    &format_endpoint(endpoints::PROPERTY_API, &property.id),
                    DELETE_PROPERTY_PROMPT,
                ))
            }
        }
    }
}

pub fn property_status_colour(status: &PropertyStatus) -> &'static str {
    match status {
        PropertyStatus::Rented => "bg-green-100 text-green-800",
        PropertyStatus::Vacant => "bg-blue-100 text-blue-800",
        PropertyStatus::UnderMaintenance => "bg-yellow-100 text-yellow-800",
        PropertyStatus::Other(_) => "bg-gray-100 text-gray-800",
    }
}
