//! Rentals link a tenant to a property and carry its payment ledger.

mod create;
mod delete;
mod details;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{create_rental_endpoint, get_new_rental_page};
pub use delete::delete_rental_endpoint;
pub use details::get_rental_page;
pub use domain::{Rental, RentalStatus, RentalUtility};
pub use edit::{get_edit_rental_page, update_rental_endpoint};
pub use form::rental_options;
pub use list::{RentStanding, get_rentals_page};
