//! Summary cards and the balance panel at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    balance::calculate_balance,
    html::{CARD_STYLE, format_currency},
    store::{ChartSummary, DashboardSummary},
};

fn card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-2xl font-semibold" { (value) }
        }
    }
}

/// Counts of tenants, properties and overdue rentals with the total earnings.
pub(super) fn summary_cards(summary: &DashboardSummary) -> Markup {
    html! {
        section class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 w-full mb-4"
        {
            (card("Tenants", &summary.total_renters.to_string()))
            (card("Properties", &summary.total_properties.to_string()))
            (card("Total Earnings", &format_currency(summary.total_earnings)))
            (card("Overdue Rentals", &summary.overdue_count.to_string()))
        }
    }
}

/// The balance computed from the chart summary, coloured red for a deficit.
pub(super) fn balance_panel(summary: &ChartSummary) -> Markup {
    let balance = calculate_balance(
        summary.earnings,
        summary.deposits,
        summary.expenses,
        summary.utilities,
    );
    let colour = if balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        div id="balance" class="mt-4"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
            p class={ "text-3xl font-bold " (colour) } { (format_currency(balance)) }
            p class="text-xs text-gray-500 dark:text-gray-400"
            {
                "Overdues are not part of the balance"
            }
        }
    }
}
