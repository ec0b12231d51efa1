//! Table views for the dashboard: the summary breakdown and the latest rentals.

use maud::{Markup, html};

use crate::{
    dates::format_day_month_year,
    endpoints::{self, format_endpoint},
    html::{TABLE_CELL_STYLE, TABLE_ROW_STYLE, badge, data_table, format_currency, link},
    reminder::rental_reminder_links,
    rental::{RentStanding, Rental},
    store::ChartSummary,
};

/// Every figure in the chart summary, including the overdues left out of the pie.
pub(super) fn breakdown_table(summary: &ChartSummary) -> Markup {
    let figures = [
        ("Earnings", summary.earnings),
        ("Expenses", summary.expenses),
        ("Utilities", summary.utilities),
        ("Deposits", summary.deposits),
        ("Overdues", summary.overdues),
    ];
    let rows: Vec<Markup> = figures
        .iter()
        .map(|(label, amount)| {
            html! {
                tr class=(TABLE_ROW_STYLE)
                {
                    th scope="row" class=(TABLE_CELL_STYLE) { (label) }
                    td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(*amount)) }
                }
            }
        })
        .collect();

    data_table(&["Category", "Amount"], &rows, "No figures available.")
}

pub(super) fn latest_rentals_table(rentals: &[&Rental]) -> Markup {
    let rows: Vec<Markup> = rentals
        .iter()
        .map(|rental| {
            let standing = RentStanding::of(rental);

            html! {
                tr class=(TABLE_ROW_STYLE)
                {
                    td class=(TABLE_CELL_STYLE)
                    {
                        (link(
                            &format_endpoint(endpoints::RENTAL_VIEW, &rental.id),
                            &rental.renter.full_name()
                        ))
                    }
                    td class=(TABLE_CELL_STYLE) { (rental.property.display_name()) }
                    td class=(TABLE_CELL_STYLE)
                    {
                        @if let Some(start) = rental.rental_start_date {
                            (format_day_month_year(start))
                        }
                    }
                    td class=(TABLE_CELL_STYLE) { (format_currency(rental.amount)) }
                    td class=(TABLE_CELL_STYLE) { (badge(standing.label(), standing.colour())) }
                }
            }
        })
        .collect();

    data_table(
        &["Tenant", "Property", "Start Date", "Rent", "Standing"],
        &rows,
        "No active rentals.",
    )
}

/// Rentals with money owing and links that open a reminder signed by `sender`.
pub(super) fn rentals_with_dues_table(rentals: &[&Rental], sender: &str) -> Markup {
    let rows: Vec<Markup> = rentals
        .iter()
        .map(|rental| {
            let reminder_links = rental_reminder_links(rental, sender);

            html! {
                tr class=(TABLE_ROW_STYLE)
                {
                    td class=(TABLE_CELL_STYLE)
                    {
                        (link(
                            &format_endpoint(endpoints::RENTAL_VIEW, &rental.id),
                            &rental.renter.full_name()
                        ))
                    }
                    td class=(TABLE_CELL_STYLE) { (rental.property.display_name()) }
                    td class=(TABLE_CELL_STYLE) { (format_currency(rental.dues)) }
                    td class=(TABLE_CELL_STYLE)
                    {
                        @match rental.deadline {
                            Some(deadline) => { (format_day_month_year(deadline)) }
                            None => { "N/A" }
                        }
                    }
                    td class=(TABLE_CELL_STYLE)
                    {
                        div class="flex gap-2"
                        {
                            @for (channel, href) in &reminder_links {
                                a
                                    href=(href)
                                    target="_blank"
                                    rel="noopener"
                                    class="text-blue-600 hover:underline dark:text-blue-500"
                                {
                                    (channel.label())
                                }
                            }
                        }
                    }
                }
            }
        })
        .collect();

    data_table(
        &["Tenant", "Property", "Dues", "Deadline", "Remind"],
        &rows,
        "No rentals have dues.",
    )
}
