//! Money spent on properties, such as repairs and salaries.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
pub mod remote;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use delete::delete_expense_endpoint;
pub use domain::{Expense, ExpenseType};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::get_expenses_page;
