//! The payments page.

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
    payment::{Payment, remote::list_payments},
    projections::total_amount,
    store::DELETE_PAYMENT_PROMPT,
};

pub async fn get_payments_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    match list_payments(&state.api, &session).await {
        Ok(payments) => payments_view(&payments).into_response(),
        Err(error) => Error::from(error).into_response(),
    }
}

fn payments_view(payments: &[Payment]) -> Markup {
    let rows: Vec<Markup> = payments.iter().map(payment_row).collect();
    let total = total_amount(payments, |payment| payment.amount);

    let content = html! {
        (list_header("Payments", endpoints::NEW_PAYMENT_VIEW, "Record Payment"))

        div class="flex justify-between w-full mb-4"
        {
            p class="font-semibold" { "Total: " (format_currency(total)) }
            (link(endpoints::PAYMENTS_EXPORT, "Download CSV"))
        }

        (data_table(
            &["Tenant", "Property", "Amount", "Date", "Late fee", "Description", "Actions"],
            &rows,
            "No payments found."
        ))
    };

    page("Payments", endpoints::PAYMENTS_VIEW, &[], &content)
}

fn payment_row(payment: &Payment) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (payment.renter.full_name()) }
            td class=(TABLE_CELL_STYLE) { (payment.property.display_name()) }
            td class=(TABLE_CELL_STYLE) { (format_currency(payment.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(date) = payment.date {
                    (format_day_month_year(date))
                }
            }
            td class=(TABLE_CELL_STYLE) { @if payment.is_late_fee { "Yes" } @else { "No" } }
            td class=(TABLE_CELL_STYLE) { (payment.description) }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_PAYMENT_VIEW, &payment.id),
                    &format_endpoint(endpoints::PAYMENT_API, &payment.id),
                    DELETE_PAYMENT_PROMPT,
                ))
            }
        }
    }
}
