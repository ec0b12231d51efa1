//! The details page for a single property.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints::{self, format_endpoint},
    html::{CARD_STYLE, badge, detail_list, format_currency, link, page},
    property::{Property, list::property_status_colour, remote::get_property},
    record_id::RecordId,
    rental::Rental,
};

/// Display the property `property_id` and the rentals the dashboard knows of for it.
pub async fn get_property_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(property_id): Path<RecordId>,
) -> Response {
    let property = match get_property(&state.api, &session, &property_id).await {
        Ok(property) => property,
        Err(error) => return Error::from(error).into_response(),
    };

    let snapshot = state.stores.get_or_load(&session).await.snapshot();
    let rentals: Vec<&Rental> = snapshot
        .rentals
        .iter()
        .filter(|rental| rental.property.id.as_ref() == Some(&property_id))
        .collect();

    let image_url = property
        .image
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{path}", state.api.base_url()));

    property_view(&property, image_url.as_deref(), &rentals).into_response()
}

fn property_view(property: &Property, image_url: Option<&str>, rentals: &[&Rental]) -> Markup {
    let description = if property.description.is_empty() {
        "No description"
    } else {
        &property.description
    };
    let details = [
        ("Name", html! { (property.name) }),
        ("Type", html! { (property.kind) }),
        ("Address", html! { (property.address) }),
        (
            "Status",
            badge(
                property.status.as_str(),
                property_status_colour(&property.status),
            ),
        ),
        ("Rental Type", html! { (property.rental_type) }),
        ("Rent Paid", html! { (format_currency(property.rent_paid)) }),
        ("Description", html! { (description) }),
    ];

    let content = html! {
        header class="w-full flex justify-between flex-wrap items-end mb-4"
        {
            h1 class="text-xl font-bold" { (property.name) }

            (link(&format_endpoint(endpoints::EDIT_PROPERTY_VIEW, &property.id), "Edit"))
        }

        div class="grid gap-4 lg:grid-cols-2 w-full"
        {
            section class=(CARD_STYLE)
            {
                (detail_list(&details))
            }

            @if let Some(image_url) = image_url {
                img src=(image_url) alt=(property.name) class="w-full rounded-lg object-cover";
            }
        }

        section class={ (CARD_STYLE) " mt-4" }
        {
            h2 class="text-lg font-semibold mb-2" { "Rentals" }

            @if rentals.is_empty() {
                p { "This property has no rentals." }
            }

            ul class="space-y-2"
            {
                @for rental in rentals {
                    li
                    {
                        (link(
                            &format_endpoint(endpoints::RENTAL_VIEW, &rental.id),
                            &rental.renter.full_name()
                        ))
                        " " (rental.status) ", " (format_currency(rental.amount))
                    }
                }
            }
        }
    };

    page(&property.name, endpoints::PROPERTIES_VIEW, &[], &content)
}
