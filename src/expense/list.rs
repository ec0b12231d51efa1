//! The expenses page, grouped by day with the balance left after expenses.

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
    balance::{calculate_balance, progress_percentage},
    dates::format_group_heading,
    endpoints::{self, format_endpoint},
    expense::{Expense, remote::list_expenses},
    html::{
        CARD_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE, data_table, format_currency, link,
        list_header, load_error, page, row_actions,
    },
    projections::{group_by_date, total_amount},
    store::{DashboardSnapshot, Resource},
};

pub const DELETE_EXPENSE_PROMPT: &str = "Are you sure you want to delete this expense?";

/// The figures shown above the expense list.
struct ExpenseTotals {
    balance: f64,
    total_expenses: f64,
    progress: Option<f64>,
}

impl ExpenseTotals {
    /// Earnings come from the dashboard summary, deposits and utilities from the chart summary.
    fn new(expenses: &[Expense], snapshot: &DashboardSnapshot) -> Self {
        let total_expenses = total_amount(expenses, |expense| expense.amount);
        let balance = calculate_balance(
            snapshot.dashboard_summary.total_earnings,
            snapshot.chart_summary.deposits,
            total_expenses,
            snapshot.chart_summary.utilities,
        );

        Self {
            balance,
            total_expenses,
            progress: progress_percentage(balance, total_expenses),
        }
    }
}

pub async fn get_expenses_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let expenses = match list_expenses(&state.api, &session).await {
        Ok(expenses) => expenses,
        Err(error) => return Error::from(error).into_response(),
    };
    let snapshot = state.stores.get_or_load(&session).await.snapshot();

    let summary_error = snapshot
        .error(Resource::DashboardSummary)
        .or_else(|| snapshot.error(Resource::ChartSummary));

    expenses_view(
        &expenses,
        &ExpenseTotals::new(&expenses, &snapshot),
        summary_error,
    )
    .into_response()
}

fn expenses_view(expenses: &[Expense], totals: &ExpenseTotals, error: Option<&str>) -> Markup {
    let groups = group_by_date(expenses, |expense| expense.date);

    let content = html! {
        (list_header("Expenses", endpoints::NEW_EXPENSE_VIEW, "Add Expense"))

        section class={ (CARD_STYLE) " mb-4" }
        {
            @if let Some(error) = error {
                (load_error(error))
            }

            @if let Some(progress) = totals.progress {
                div class="h-2 bg-amber-400 rounded-full mb-6 overflow-hidden"
                {
                    div
                        class="h-full bg-purple-600 rounded-full"
                        style=(format!("width: {:.1}%", progress.clamp(0.0, 100.0)))
                    {}
                }
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    div class="text-sm text-gray-500" { "BALANCE" }
                    div class="text-lg font-semibold" { (format_currency(totals.balance)) }
                }

                div
                {
                    div class="text-sm text-gray-500" { "EXPENSES" }
                    div class="text-lg font-semibold" { (format_currency(totals.total_expenses)) }
                }
            }

            div class="mt-4" { (link(endpoints::EXPENSES_EXPORT, "Download CSV")) }
        }

        @if groups.is_empty() {
            p class="text-center" { "No expenses found." }
        }

        @for (date, expenses_on_date) in groups.iter().rev() {
            section class="mb-4" data-date=(date)
            {
                div class="flex justify-between px-2 py-3 text-sm text-gray-500"
                {
                    span { (format_group_heading(*date)) }
                    span
                    {
                        (format_currency(total_amount(expenses_on_date, |expense| expense.amount)))
                    }
                }

                (data_table(
                    &["Type", "Property", "Tenant", "Amount", "Description", "Actions"],
                    &expenses_on_date.iter().map(|expense| expense_row(expense)).collect::<Vec<_>>(),
                    "No expenses found."
                ))
            }
        }
    };

    page("Expenses", endpoints::EXPENSES_VIEW, &[], &content)
}

fn expense_row(expense: &Expense) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (expense.kind) }
            td class=(TABLE_CELL_STYLE) { (expense.property.display_name()) }
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(renter) = &expense.renter {
                    (renter.full_name())
                } @else {
                    "-"
                }
            }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { (expense.description) }
            td class=(TABLE_CELL_STYLE)
            {
                (row_actions(
                    &format_endpoint(endpoints::EDIT_EXPENSE_VIEW, &expense.id),
                    &format_endpoint(endpoints::EXPENSE_API, &expense.id),
                    DELETE_EXPENSE_PROMPT,
                ))
            }
        }
    }
}
