//! Utility charges, such as water and electricity, billed against rentals.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{create_utility_endpoint, get_new_utility_page};
pub use delete::delete_utility_endpoint;
pub use domain::{UTILITY_TYPES, Utility};
pub use edit::{get_edit_utility_page, update_utility_endpoint};
pub use list::get_utilities_page;
