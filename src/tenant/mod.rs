//! Tenants, called renters by the remote API.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{create_tenant_endpoint, get_new_tenant_page};
pub use delete::delete_tenant_endpoint;
pub use domain::{ActiveStatus, PaymentStatus, Renter, RenterRef};
pub use edit::{get_edit_tenant_page, update_tenant_endpoint};
pub use list::{get_tenants_page, payment_status_colour};
