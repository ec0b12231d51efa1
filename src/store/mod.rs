//! Cached dashboard data for each signed-in session.
//!
//! The remote API owns every record. A [DashboardStore] keeps the summaries
//! shown on the dashboard and refreshes exactly the resources a write makes
//! stale, see [invalidated_by].

mod dashboard_store;
mod registry;
mod resource;
mod summaries;
mod task_scope;

pub use dashboard_store::{
    DELETE_PAYMENT_PROMPT, DELETE_UTILITY_PROMPT, DashboardSnapshot, DashboardStore, DeleteOutcome,
};
pub use registry::DashboardStores;
pub use resource::{Change, Mutation, Resource, ResourceSet, invalidated_by};
pub use summaries::{ChartSummary, DashboardSummary, PaymentsPeriod, PaymentsSummary, Period};
