//! Properties and their pages.

mod create;
mod delete;
mod details;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{create_property_endpoint, get_new_property_page};
pub use delete::delete_property_endpoint;
pub use details::get_property_page;
pub use domain::{PROPERTY_TYPES, Property, PropertyRef, PropertyStatus, RentalType};
pub use edit::{get_edit_property_page, update_property_endpoint};
pub use list::{get_properties_page, property_status_colour};
