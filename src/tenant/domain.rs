use serde::Deserialize;

use crate::{
    api::null_as_default, property::PropertyRef, record_id::RecordId, remote_enum::remote_enum,
};

remote_enum! {
    /// Where a tenant stands with their rent.
    pub enum PaymentStatus {
        Paid => "Paid",
        PartiallyPaid => "Partially Paid",
        Pending => "Pending",
        Overdue => "Overdue",
        Unpaid => "Unpaid",
    }
    default = Unpaid;
}

remote_enum! {
    /// Whether a tenant currently rents a property.
    pub enum ActiveStatus {
        Active => "Active",
        Past => "Past",
        Inactive => "Inactive",
    }
    default = Active;
}

/// A tenant, called a renter by the remote API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renter {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property: Option<PropertyRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub active_status: ActiveStatus,
}

impl Renter {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A reference to a tenant from another record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RenterRefRepr")]
pub struct RenterRef {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub payment_status: Option<PaymentStatus>,
    pub active_status: Option<ActiveStatus>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RenterRefRepr {
    Id(String),
    Object(RenterObject),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenterObject {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    phone: String,
    #[serde(default)]
    payment_status: Option<PaymentStatus>,
    #[serde(default)]
    active_status: Option<ActiveStatus>,
}

impl From<RenterRefRepr> for RenterRef {
    fn from(repr: RenterRefRepr) -> Self {
        match repr {
            RenterRefRepr::Id(id) => Self {
                id: RecordId::new(&id).ok(),
                ..Default::default()
            },
            RenterRefRepr::Object(renter) => Self {
                id: renter.id.and_then(|id| RecordId::new(&id).ok()),
                first_name: renter.first_name,
                last_name: renter.last_name,
                email: renter.email,
                phone: renter.phone,
                payment_status: renter.payment_status,
                active_status: renter.active_status,
            },
        }
    }
}

impl RenterRef {
    pub fn full_name(&self) -> String {
        let name = full_name(&self.first_name, &self.last_name);

        if name.is_empty() {
            "Unknown tenant".to_owned()
        } else {
            name
        }
    }
}

fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_owned()
}
