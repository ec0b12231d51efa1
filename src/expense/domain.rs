use serde::Deserialize;
use time::Date;

use crate::{
    api::null_as_default, dates, property::PropertyRef, record_id::RecordId,
    remote_enum::remote_enum, tenant::RenterRef,
};

remote_enum! {
    /// What an expense was spent on.
    pub enum ExpenseType {
        Plumbing => "Plumbing",
        Electricals => "Electricals",
        PaintWorks => "Paint Works",
        CaretakerSalary => "Caretaker Salary",
        CleaningServices => "Cleaning Services",
        Security => "Security",
        Miscellaneous => "Other",
    }
    default = Miscellaneous;
}

/// Money spent on a property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property: PropertyRef,
    /// The tenant the expense relates to, if any.
    #[serde(default, deserialize_with = "null_as_default")]
    pub renter: Option<RenterRef>,
    #[serde(rename = "type", default)]
    pub kind: ExpenseType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, with = "dates::lenient")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}
