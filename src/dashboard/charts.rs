//! The pie chart of the monetary summary.
//!
//! The chart is generated as an ECharts configuration and initialised by a
//! script in the page head.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{html::HeadElement, store::ChartSummary};

/// The ECharts build served from the CDN.
pub(super) const ECHARTS_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// Slice colours in the order of [summary_pie_chart]'s data.
const SLICE_COLOURS: [&str; 4] = ["#4F46E5", "#EF4444", "#10B981", "#6366F1"];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

pub(super) fn chart_container(chart: &DashboardChart) -> Markup {
    html! {
        div
            id=(chart.id)
            class="min-h-[320px] rounded dark:bg-gray-100"
        {}
    }
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Charts follow the browser's dark mode setting and resize with the window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Earnings, expenses, utilities and deposits as slices of a pie.
///
/// Overdues are money not yet received, so they are left out of the pie.
pub(super) fn summary_pie_chart(summary: &ChartSummary) -> Chart {
    Chart::new()
        .title(Title::new().text("Financial Overview"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .color(SLICE_COLOURS.into_iter().map(Color::from).collect())
        .series(
            Pie::new()
                .name("Summary")
                .radius(vec!["40%", "70%"])
                .data(vec![
                    (summary.earnings, "Earnings"),
                    (summary.expenses, "Expenses"),
                    (summary.utilities, "Utilities"),
                    (summary.deposits, "Deposits"),
                ]),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'KES'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use crate::store::ChartSummary;

    use super::summary_pie_chart;

    #[test]
    fn pie_leaves_out_overdues() {
        let summary = ChartSummary {
            earnings: 50000.0,
            expenses: 10000.0,
            utilities: 5000.0,
            overdues: 2000.0,
            deposits: 15000.0,
        };

        let options = summary_pie_chart(&summary).to_string();

        for name in ["Earnings", "Expenses", "Utilities", "Deposits"] {
            assert!(options.contains(&format!("\"{name}\"")), "{name} missing from the pie");
        }
        assert!(!options.contains("Overdues"));
        assert!(options.contains("#4F46E5"));
    }
}
