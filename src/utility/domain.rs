use serde::Deserialize;
use time::Date;

use crate::{
    api::null_as_default, dates, property::PropertyRef, record_id::RecordId, tenant::RenterRef,
};

/// A utility charge (electricity, water, etc.) billed against a rental.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utility {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub renter: RenterRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property: PropertyRef,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, with = "dates::lenient")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Utility types offered in forms. Any other type entered by the remote API is kept.
pub const UTILITY_TYPES: &[&str] = &[
    "Garbage",
    "Electricity",
    "Water",
    "Service Charge",
    "Security Fees",
];
