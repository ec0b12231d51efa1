//! The payments summary widget and the htmx endpoint that changes its period.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    endpoints,
    html::{CARD_STYLE, FORM_TEXT_INPUT_STYLE, format_currency, load_error},
    store::{PaymentsPeriod, PaymentsSummary, Period},
    timezone::local_today,
};

/// How many past years the year selector offers.
const YEARS_SHOWN: i32 = 5;

/// The period chosen with the selectors. Missing values default to today's month and year.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentsSummaryQuery {
    pub period: Option<Period>,
    pub month: Option<u8>,
    pub year: Option<i32>,
}

impl PaymentsSummaryQuery {
    fn payments_period(&self, today: Date) -> Result<PaymentsPeriod, Error> {
        let month = match self.month {
            Some(month) => Month::try_from(month)
                .map_err(|_| Error::Validation(format!("{month} is not a month of the year")))?,
            None => today.month(),
        };

        Ok(PaymentsPeriod {
            period: self.period.unwrap_or_default(),
            month,
            year: self.year.unwrap_or(today.year()),
        })
    }
}

/// Refresh the payments summary for the chosen period and render the widget.
pub async fn get_payments_summary(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Query(query): Query<PaymentsSummaryQuery>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let period = match query.payments_period(today) {
        Ok(period) => period,
        Err(error) => return error.into_alert_response(),
    };

    let store = state.stores.get_or_load(&session).await;

    // Figures from an earlier period must not be shown under this period's title.
    match store.refresh_payments_summary(period).await {
        Ok(summary) => payments_summary_view(period, &summary, None, today),
        Err(error) => payments_summary_view(
            period,
            &PaymentsSummary::default(),
            Some(&error.user_message()),
            today,
        ),
    }
    .into_response()
}

pub(super) fn payments_summary_view(
    period: PaymentsPeriod,
    summary: &PaymentsSummary,
    error: Option<&str>,
    today: Date,
) -> Markup {
    let months = (1..=12).filter_map(|month| Month::try_from(month).ok());
    let years = (today.year() - YEARS_SHOWN + 1..=today.year()).rev();

    html! {
        section id="payments-summary" class=(CARD_STYLE)
        {
            form
                hx-get=(endpoints::DASHBOARD_PAYMENTS_SUMMARY)
                hx-trigger="change"
                hx-target="#payments-summary"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="flex flex-wrap gap-2 mb-4"
            {
                select name="period" aria-label="Period" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, label) in [(Period::Month, "Monthly"), (Period::Year, "Yearly")] {
                        option value=(value.as_str()) selected[value == period.period] { (label) }
                    }
                }

                select name="month" aria-label="Month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for month in months {
                        option value=(u8::from(month)) selected[month == period.month] { (month) }
                    }
                }

                select name="year" aria-label="Year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for year in years {
                        option value=(year) selected[year == period.year] { (year) }
                    }
                }
            }

            h2 class="text-lg font-semibold mb-2" { (period.title()) }

            @if let Some(error) = error {
                (load_error(error))
            }

            dl class="grid grid-cols-2 gap-4"
            {
                div
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Earnings" }
                    dd class="text-xl font-semibold" { (format_currency(summary.earnings)) }
                }

                div
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Past Due" }
                    dd class="text-xl font-semibold" { (format_currency(summary.past_due)) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Extension, Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::Selector;
    use serde_json::json;
    use time::{Month, macros::date};

    use crate::{
        store::{PaymentsPeriod, Period},
        test_utils::{
            assert_status, body_text, parse_html_fragment, remote_state, spawn_remote,
            test_session, with_dashboard_routes,
        },
    };

    use super::{PaymentsSummaryQuery, get_payments_summary};

    #[test]
    fn missing_values_default_to_today() {
        let period = PaymentsSummaryQuery::default()
            .payments_period(date!(2025 - 03 - 15))
            .unwrap();

        assert_eq!(
            period,
            PaymentsPeriod {
                period: Period::Month,
                month: Month::March,
                year: 2025
            }
        );
    }

    #[test]
    fn rejects_month_thirteen() {
        let query = PaymentsSummaryQuery {
            month: Some(13),
            ..Default::default()
        };

        assert!(query.payments_period(date!(2025 - 03 - 15)).is_err());
    }

    #[tokio::test]
    async fn renders_summary_for_chosen_year() {
        let remote = spawn_remote(with_dashboard_routes(Router::new().route(
            "/api/admin/payments/summary",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                if query["period"] == "year" && query["year"] == "2024" {
                    Json(json!({"earnings": 360000, "pastDue": 4500}))
                } else {
                    Json(json!({"earnings": 30000, "pastDue": 2000}))
                }
            }),
        )))
        .await;

        let response = get_payments_summary(
            State(remote_state(&remote)),
            Extension(test_session("abc")),
            Query(PaymentsSummaryQuery {
                period: Some(Period::Year),
                month: Some(1),
                year: Some(2024),
            }),
        )
        .await;

        assert_status(&response, StatusCode::OK);
        let fragment = parse_html_fragment(response).await;
        let html = fragment.html();
        assert!(html.contains("2024 Payments"));
        assert!(html.contains("KES 360,000.00"));
        assert!(html.contains("KES 4,500.00"));
        let period = Selector::parse("select[name=period] option[selected]").unwrap();
        let period = fragment.select(&period).next().expect("No period selected");
        assert_eq!(period.value().attr("value"), Some("year"));
    }

    #[tokio::test]
    async fn failed_refresh_does_not_relabel_earlier_figures() {
        let remote = spawn_remote(with_dashboard_routes(Router::new().route(
            "/api/admin/payments/summary",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                if query["period"] == "year" {
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                } else {
                    Ok(Json(json!({"earnings": 30000, "pastDue": 2000})))
                }
            }),
        )))
        .await;
        let state = remote_state(&remote);

        let monthly = get_payments_summary(
            State(state.clone()),
            Extension(test_session("abc")),
            Query(PaymentsSummaryQuery {
                period: Some(Period::Month),
                month: Some(1),
                year: Some(2025),
            }),
        )
        .await;
        assert!(body_text(monthly).await.contains("KES 30,000.00"));

        let response = get_payments_summary(
            State(state),
            Extension(test_session("abc")),
            Query(PaymentsSummaryQuery {
                period: Some(Period::Year),
                month: Some(1),
                year: Some(2024),
            }),
        )
        .await;

        assert_status(&response, StatusCode::OK);
        let fragment = parse_html_fragment(response).await;
        let html = fragment.html();
        assert!(html.contains("2024 Payments"));
        assert!(!html.contains("KES 30,000.00"));
        let error = Selector::parse("p[role=status]").unwrap();
        assert!(fragment.select(&error).next().is_some());
    }
}
