//! The property form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    html::{FormTarget, amount_field, input_field, select_field, submit_button, textarea_field},
    property::{PROPERTY_TYPES, Property, PropertyStatus, RentalType},
    validation::{parse_amount, required},
};

/// The property fields sent to the remote API.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub name: String,
    pub kind: String,
    pub address: String,
    pub status: PropertyStatus,
    pub rental_type: RentalType,
    pub rent_paid: f64,
    pub description: String,
}

/// The raw property form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub status: String,
    pub rental_type: String,
    pub rent_paid: String,
    pub description: String,
}

impl PropertyForm {
    /// An empty form for a vacant house let monthly.
    pub fn new_property() -> Self {
        Self {
            kind: PROPERTY_TYPES[0].to_owned(),
            status: PropertyStatus::Vacant.to_string(),
            rental_type: RentalType::Monthly.to_string(),
            ..Default::default()
        }
    }

    pub fn from_property(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            kind: property.kind.clone(),
            address: property.address.clone(),
            status: property.status.to_string(),
            rental_type: property.rental_type.to_string(),
            rent_paid: property.rent_paid.to_string(),
            description: property.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<PropertyDraft, Error> {
        let name = required("Name", &self.name)?;
        let kind = required("Type", &self.kind)?;
        let address = required("Address", &self.address)?;
        let rent_paid = parse_amount("Rent", &self.rent_paid)?;

        Ok(PropertyDraft {
            name: name.to_owned(),
            kind: kind.to_owned(),
            address: address.to_owned(),
            status: PropertyStatus::from_label(&self.status),
            rental_type: RentalType::from_label(&self.rental_type),
            rent_paid,
            description: self.description.trim().to_owned(),
        })
    }
}

pub fn property_form(form: &PropertyForm, target: FormTarget) -> Markup {
    let kinds: Vec<(String, String)> = PROPERTY_TYPES
        .iter()
        .map(|kind| ((*kind).to_owned(), (*kind).to_owned()))
        .collect();
    let submit_text = match target {
        FormTarget::Create(_) => "Add Property",
        FormTarget::Update(_) => "Update Property",
    };

    html! {
        form
            hx-post=[target.post_url()]
            hx-put=[target.put_url()]
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4"
        {
            (input_field("Name", "name", "text", &form.name, true))
            (select_field("Type", "type", &kinds, &form.kind, true))
            (input_field("Address", "address", "text", &form.address, true))
            (select_field("Status", "status", &PropertyStatus::options(), &form.status, true))
            (select_field(
                "Rental type",
                "rentalType",
                &RentalType::options(),
                &form.rental_type,
                true
            ))
            (amount_field("Rent", "rentPaid", &form.rent_paid))
            (textarea_field("Description", "description", &form.description))
            (submit_button(submit_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        property::{PropertyStatus, RentalType},
    };

    use super::PropertyForm;

    fn form() -> PropertyForm {
        PropertyForm {
            name: "Sunrise Apartments".to_owned(),
            address: "Ngong Road".to_owned(),
            rent_paid: "15000".to_owned(),
            status: "Under Maintenance".to_owned(),
            rental_type: "Quarterly".to_owned(),
            ..PropertyForm::new_property()
        }
    }

    #[test]
    fn valid_form() {
        let draft = form().validate().unwrap();

        assert_eq!(draft.kind, "House");
        assert_eq!(draft.status, PropertyStatus::UnderMaintenance);
        assert_eq!(draft.rental_type, RentalType::Quarterly);
        assert_eq!(draft.rent_paid, 15000.0);
    }

    #[test]
    fn rent_must_be_a_non_negative_number() {
        for rent in ["", "abc", "-5"] {
            let form = PropertyForm {
                rent_paid: rent.to_owned(),
                ..form()
            };

            assert!(matches!(form.validate(), Err(Error::Validation(_))));
        }
    }
}
