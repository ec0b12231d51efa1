use serde::Deserialize;

use crate::{api::null_as_default, record_id::RecordId, remote_enum::remote_enum};

remote_enum! {
    /// Whether a property is occupied.
    pub enum PropertyStatus {
        Rented => "Rented",
        Vacant => "Vacant",
        UnderMaintenance => "Under Maintenance",
    }
    default = Vacant;
}

remote_enum! {
    /// How often rent is charged for a property, also used as a rental's frequency.
    pub enum RentalType {
        Daily => "Daily",
        Weekly => "Weekly",
        Monthly => "Monthly",
        Quarterly => "Quarterly",
        Yearly => "Yearly",
    }
    default = Monthly;
}

/// Property kinds offered in forms. Any other kind sent by the remote API is kept.
pub const PROPERTY_TYPES: [&str; 4] = ["House", "Shop", "Flat", "Other"];

/// A property managed by the administrator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// The kind of property, e.g. "Apartment".
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default)]
    pub status: PropertyStatus,
    #[serde(default)]
    pub rental_type: RentalType,
    /// The rent charged per period of `rental_type`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rent_paid: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// The path of the property's photo on the remote API, e.g. "/uploads/p1.jpg".
    #[serde(default)]
    pub image: Option<String>,
}

/// A reference to a property from another record.
///
/// The remote API sends either the bare ID or a populated object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PropertyRefRepr")]
pub struct PropertyRef {
    pub id: Option<RecordId>,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropertyRefRepr {
    Id(String),
    Object {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
    },
}

impl From<PropertyRefRepr> for PropertyRef {
    fn from(repr: PropertyRefRepr) -> Self {
        match repr {
            PropertyRefRepr::Id(id) => Self {
                id: RecordId::new(&id).ok(),
                name: String::new(),
            },
            PropertyRefRepr::Object { id, name } => Self {
                id: id.and_then(|id| RecordId::new(&id).ok()),
                name,
            },
        }
    }
}

impl PropertyRef {
    /// The property's name, or a placeholder if the property was not populated.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown property"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record_id::RecordId;

    use super::{Property, PropertyRef, PropertyStatus, RentalType};

    #[test]
    fn decodes_remote_property() {
        let json = r#"{
            "_id": "p1",
            "name": "Sunrise Apartments",
            "type": "Apartment",
            "address": "Ngong Road",
            "status": "Under Maintenance",
            "rentalType": "Monthly",
            "rentPaid": 15000,
            "description": null
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();

        assert_eq!(property.id, RecordId::new("p1").unwrap());
        assert_eq!(property.kind, "Apartment");
        assert_eq!(property.status, PropertyStatus::UnderMaintenance);
        assert_eq!(property.rental_type, RentalType::Monthly);
        assert_eq!(property.rent_paid, 15000.0);
        assert_eq!(property.description, "");
    }

    #[test]
    fn reference_accepts_id_or_object() {
        let by_id: PropertyRef = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(by_id.id, Some(RecordId::new("p1").unwrap()));
        assert_eq!(by_id.display_name(), "Unknown property");

        let populated: PropertyRef =
            serde_json::from_str(r#"{"_id": "p1", "name": "Sunrise"}"#).unwrap();
        assert_eq!(populated.display_name(), "Sunrise");
    }
}
