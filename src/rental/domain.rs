use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    api::null_as_default,
    dates,
    property::{PropertyRef, RentalType},
    record_id::RecordId,
    remote_enum::remote_enum,
    tenant::RenterRef,
};

remote_enum! {
    /// Whether a rental agreement is current.
    pub enum RentalStatus {
        Rented => "Rented",
        Past => "Past",
    }
    default = Rented;
}

/// A billable charge agreed as part of a rental, e.g. water at KES 500.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalUtility {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
}

/// An agreement linking a tenant to a property, with its payment ledger.
///
/// The remote API owns rentals: this is the last response it sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property: PropertyRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub renter: RenterRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deposit: f64,
    #[serde(default)]
    pub status: RentalStatus,
    #[serde(default, with = "dates::lenient")]
    pub rental_start_date: Option<Date>,
    #[serde(default, with = "dates::lenient")]
    pub rental_end_date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paid_amount: f64,
    /// The amount owed and not yet paid.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dues: f64,
    #[serde(default, with = "dates::lenient")]
    pub deadline: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub utilities_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub utility_paid_amount: f64,
    /// The part of `dues` owed for utilities.
    #[serde(default, deserialize_with = "null_as_default")]
    pub utility_dues: f64,
    #[serde(default)]
    pub rental_frequency: RentalType,
    #[serde(default, with = "dates::lenient")]
    pub payment_cycle: Option<Date>,
    /// A label such as "12 months", computed when the rental was saved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub utilities: Vec<RentalUtility>,
}

/// The body of `GET /api/admin/rentals/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RentalEnvelope {
    pub rental: Rental,
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::property::RentalType;

    use super::{Rental, RentalStatus};

    #[test]
    fn decodes_remote_rental_with_missing_fields() {
        let json = r#"{
            "_id": "r1",
            "property": {"_id": "p1", "name": "Sunrise"},
            "renter": {"_id": "t1", "firstName": "Amina", "lastName": "Otieno"},
            "amount": 15000,
            "status": "Past",
            "rentalStartDate": "2025-01-01T00:00:00.000Z",
            "deadline": "not a date",
            "rentalFrequency": "Weekly",
            "utilities": [{"type": "Water", "amount": 500}]
        }"#;

        let rental: Rental = serde_json::from_str(json).unwrap();

        assert_eq!(rental.status, RentalStatus::Past);
        assert_eq!(rental.rental_start_date, Some(date!(2025 - 01 - 01)));
        assert_eq!(rental.deadline, None);
        assert_eq!(rental.deposit, 0.0);
        assert_eq!(rental.rental_frequency, RentalType::Weekly);
        assert_eq!(rental.utilities[0].kind, "Water");
        assert_eq!(rental.renter.full_name(), "Amina Otieno");
    }
}
