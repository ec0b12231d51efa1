use serde::Deserialize;
use time::Date;

use crate::{
    api::null_as_default, dates, property::PropertyRef, record_id::RecordId, tenant::RenterRef,
};

/// Rent received from a tenant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub renter: RenterRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property: PropertyRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, with = "dates::lenient")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_late_fee: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}
