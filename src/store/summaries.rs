//! Pre-aggregated figures computed by the remote API.

use serde::Deserialize;
use time::{Date, Month};

use crate::{
    api::{ApiClient, ApiError, null_as_default},
    auth::Session,
};

const DASHBOARD_SUMMARY_PATH: &str = "/api/admin/dashboard/summary";
const CHART_SUMMARY_PATH: &str = "/api/admin/dashboard/chartsummary";
const PAYMENTS_SUMMARY_PATH: &str = "/api/admin/payments/summary";

/// The figures on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_renters: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_properties: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_earnings: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overdue_count: u64,
}

/// The monetary summary behind the balance and the pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ChartSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub earnings: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expenses: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub utilities: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overdues: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deposits: f64,
}

/// Earnings and past-due amounts for a [PaymentsPeriod].
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub earnings: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub past_due: f64,
}

/// Whether the payments summary covers a month or a whole year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

/// The period the payments summary is requested for.
///
/// The month is sent even when `period` is [Period::Year].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentsPeriod {
    pub period: Period,
    pub month: Month,
    pub year: i32,
}

impl PaymentsPeriod {
    /// The month containing `today`.
    pub fn current_month(today: Date) -> Self {
        Self {
            period: Period::Month,
            month: today.month(),
            year: today.year(),
        }
    }

    /// A title for the period, e.g. "March Payments" or "2025 Payments".
    pub fn title(&self) -> String {
        match self.period {
            Period::Month => format!("{} Payments", self.month),
            Period::Year => format!("{} Payments", self.year),
        }
    }

    fn query(&self) -> [(&'static str, String); 3] {
        [
            ("period", self.period.as_str().to_owned()),
            ("month", u8::from(self.month).to_string()),
            ("year", self.year.to_string()),
        ]
    }
}

pub async fn fetch_dashboard_summary(
    api: &ApiClient,
    session: &Session,
) -> Result<DashboardSummary, ApiError> {
    api.get(DASHBOARD_SUMMARY_PATH, Some(session)).await
}

pub async fn fetch_chart_summary(
    api: &ApiClient,
    session: &Session,
) -> Result<ChartSummary, ApiError> {
    api.get(CHART_SUMMARY_PATH, Some(session)).await
}

pub async fn fetch_payments_summary(
    api: &ApiClient,
    session: &Session,
    period: PaymentsPeriod,
) -> Result<PaymentsSummary, ApiError> {
    api.get_with_query(PAYMENTS_SUMMARY_PATH, &period.query(), Some(session))
        .await
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use super::{ChartSummary, PaymentsPeriod, Period};

    #[test]
    fn current_month_period() {
        let period = PaymentsPeriod::current_month(date!(2025 - 03 - 15));

        assert_eq!(
            period,
            PaymentsPeriod {
                period: Period::Month,
                month: Month::March,
                year: 2025
            }
        );
        assert_eq!(period.title(), "March Payments");
        assert_eq!(
            period.query(),
            [
                ("period", "month".to_owned()),
                ("month", "3".to_owned()),
                ("year", "2025".to_owned())
            ]
        );
    }

    #[test]
    fn missing_figures_are_zero() {
        let summary: ChartSummary =
            serde_json::from_str(r#"{"earnings": 100, "expenses": null}"#).unwrap();

        assert_eq!(
            summary,
            ChartSummary {
                earnings: 100.0,
                ..Default::default()
            }
        );
    }
}
