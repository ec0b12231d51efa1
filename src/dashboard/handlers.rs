//! The dashboard page.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    app_state::RemoteState,
    auth::Session,
    dashboard::{
        cards::{balance_panel, summary_cards},
        charts::{
            DashboardChart, ECHARTS_SCRIPT, chart_container, charts_script, summary_pie_chart,
        },
        payments_summary::payments_summary_view,
        tables::{breakdown_table, latest_rentals_table, rentals_with_dues_table},
    },
    endpoints,
    html::{CARD_STYLE, HeadElement, link, load_error, page},
    projections::{latest_active_rentals, rentals_with_dues},
    store::{DashboardSnapshot, PaymentsPeriod, Resource},
    timezone::local_today,
};

/// How many of the latest active rentals the dashboard lists.
const LATEST_RENTALS_SHOWN: usize = 10;

/// Display an overview of the administrator's properties and finances.
///
/// Everything shown comes from the session's dashboard store. A figure that
/// could not be loaded is reported next to its widget.
pub async fn get_dashboard_page(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };
    let snapshot = state.stores.get_or_load(&session).await.snapshot();

    dashboard_view(&session.name, &snapshot, today).into_response()
}

fn dashboard_view(name: &str, snapshot: &DashboardSnapshot, today: Date) -> Markup {
    let chart = DashboardChart {
        id: "summary-chart",
        options: summary_pie_chart(&snapshot.chart_summary).to_string(),
    };
    let period = snapshot
        .payments_period
        .unwrap_or_else(|| PaymentsPeriod::current_month(today));
    let latest_rentals = latest_active_rentals(&snapshot.rentals, LATEST_RENTALS_SHOWN);
    let rentals_owing = rentals_with_dues(&snapshot.rentals);

    let content = html! {
        h1 class="text-2xl font-bold mb-4" { "Jambo, " (name) }

        @if let Some(error) = snapshot.error(Resource::DashboardSummary) {
            (load_error(error))
        }
        (summary_cards(&snapshot.dashboard_summary))

        div class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full mb-4"
        {
            section class=(CARD_STYLE)
            {
                @if let Some(error) = snapshot.error(Resource::ChartSummary) {
                    (load_error(error))
                }
                (chart_container(&chart))
                (balance_panel(&snapshot.chart_summary))
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Breakdown" }
                (breakdown_table(&snapshot.chart_summary))
            }
        }

        div class="w-full mb-4"
        {
            (payments_summary_view(
                period,
                &snapshot.payments_summary,
                snapshot.error(Resource::PaymentsSummary),
                today,
            ))
        }

        section class="w-full"
        {
            header class="flex justify-between items-end mb-2"
            {
                h2 class="text-lg font-semibold" { "Latest Rentals" }
                (link(endpoints::RENTALS_VIEW, "View all"))
            }

            @if let Some(error) = snapshot.error(Resource::Rentals) {
                (load_error(error))
            }
            (latest_rentals_table(&latest_rentals))
        }

        section id="rentals-with-dues" class="w-full mt-4"
        {
            h2 class="text-lg font-semibold mb-2" { "Rentals with Dues" }
            (rentals_with_dues_table(&rentals_owing, name))
        }
    };

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&[chart]),
    ];

    page("Dashboard", endpoints::DASHBOARD_VIEW, &scripts, &content)
}
