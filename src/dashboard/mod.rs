//! Dashboard module
//!
//! The landing page after logging in: summary cards, a pie chart of the
//! monetary summary with the balance, the payments summary for a chosen
//! period and the latest rentals.

mod cards;
mod charts;
mod handlers;
mod payments_summary;
mod tables;

pub use handlers::get_dashboard_page;
pub use payments_summary::get_payments_summary;
