//! Rent payments recorded against rentals.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{NewLedgerEntryQuery, create_payment_endpoint, get_new_payment_page};
pub use delete::delete_payment_endpoint;
pub use domain::Payment;
pub use edit::{get_edit_payment_page, update_payment_endpoint};
pub use list::get_payments_page;
