//! The details page for a single rental, with its payment reminders.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    dates::format_day_month_year,
    endpoints::{self, format_endpoint},
    html::{BUTTON_SECONDARY_STYLE, CARD_STYLE, detail_list, format_currency, link, page},
    record_id::RecordId,
    reminder::rental_reminder_links,
    rental::{Rental, remote::get_rental},
};

pub async fn get_rental_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(rental_id): Path<RecordId>,
) -> Response {
    match get_rental(&state.api, &session, &rental_id).await {
        Ok(rental) => rental_view(&rental, &session.name).into_response(),
        Err(error) => Error::from(error).into_response(),
    }
}

fn date_or_dash(date: Option<Date>) -> String {
    date.map(format_day_month_year)
        .unwrap_or_else(|| "-".to_owned())
}

fn rental_view(rental: &Rental, sender: &str) -> Markup {
    let description = if rental.description.is_empty() {
        "N/A"
    } else {
        &rental.description
    };
    let details = [
        ("Property", html! { (rental.property.display_name()) }),
        ("Tenant", html! { (rental.renter.full_name()) }),
        ("Rental Start Date", html! { (date_or_dash(rental.rental_start_date)) }),
        ("Rental End Date", html! { (date_or_dash(rental.rental_end_date)) }),
        ("Payment Cycle", html! { (date_or_dash(rental.payment_cycle)) }),
        ("Rental Frequency", html! { (rental.rental_frequency) }),
        ("Duration", html! { (rental.duration) }),
        ("Amount", html! { (format_currency(rental.amount)) }),
        ("Deposit", html! { (format_currency(rental.deposit)) }),
        ("Status", html! { (rental.status) }),
        ("Description", html! { (description) }),
        ("Deadline", html! { (date_or_dash(rental.deadline)) }),
        (
            "Rent Dues",
            html! { (format_currency(rental.dues - rental.utility_dues)) },
        ),
        ("Utility Dues", html! { (format_currency(rental.utility_dues)) }),
    ];
    let reminder_links = rental_reminder_links(rental, sender);
    let new_payment_url = format!("{}?rental_id={}", endpoints::NEW_PAYMENT_VIEW, rental.id);
    let new_utility_url = format!("{}?rental_id={}", endpoints::NEW_UTILITY_VIEW, rental.id);

    let content = html! {
        header class="w-full flex justify-between flex-wrap items-end mb-4"
        {
            h1 class="text-xl font-bold" { "Rental Details" }

            div class="flex gap-4"
            {
                (link(&new_payment_url, "Record payment"))
                (link(&new_utility_url, "Add utility charge"))
                (link(&format_endpoint(endpoints::EDIT_RENTAL_VIEW, &rental.id), "Edit"))
            }
        }

        section class=(CARD_STYLE)
        {
            (detail_list(&details))
        }

        section class={ (CARD_STYLE) " mt-4" }
        {
            h2 class="text-lg font-semibold mb-2" { "Utilities" }

            @if rental.utilities.is_empty() {
                p { "No utilities" }
            } @else {
                ul class="divide-y"
                {
                    @for utility in &rental.utilities {
                        li class="flex justify-between py-2"
                        {
                            span { (utility.kind) }
                            span class="font-semibold" { (format_currency(utility.amount)) }
                        }
                    }
                }

                p class="mt-2 font-semibold"
                {
                    "Total Utilities: " (format_currency(rental.utilities_total))
                }
            }
        }

        section class={ (CARD_STYLE) " mt-4" }
        {
            h2 class="text-lg font-semibold mb-2" { "Send reminder" }

            @if reminder_links.is_empty() {
                p { "The tenant has no email address or phone number." }
            }

            div class="flex flex-wrap gap-2"
            {
                @for (channel, href) in &reminder_links {
                    a href=(href) target="_blank" rel="noopener" class=(BUTTON_SECONDARY_STYLE)
                    {
                        (channel.label())
                    }
                }

                @if !rental.renter.phone.trim().is_empty() {
                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        hx-post=(format_endpoint(endpoints::RENTAL_SMS_REMINDER, &rental.id))
                        hx-target-error="#alert-container"
                        hx-swap="none"
                    {
                        "Send SMS now"
                    }
                }
            }
        }
    };

    page("Rental Details", endpoints::RENTALS_VIEW, &[], &content)
}
