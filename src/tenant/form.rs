//! The tenant form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    html::{FormTarget, input_field, select_field, submit_button},
    property::Property,
    record_id::{RecordId, id_or_empty},
    tenant::{ActiveStatus, PaymentStatus, Renter},
    validation::{parse_selected_id, required},
};

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// The tenant fields sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenterDraft {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    #[serde(serialize_with = "id_or_empty")]
    pub property: Option<RecordId>,
    pub payment_status: PaymentStatus,
    pub active_status: ActiveStatus,
}

/// The raw tenant form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub property: String,
    pub payment_status: String,
    pub active_status: String,
}

impl TenantForm {
    /// An empty form for a new, active tenant.
    pub fn new_tenant() -> Self {
        Self {
            payment_status: PaymentStatus::Unpaid.to_string(),
            active_status: ActiveStatus::Active.to_string(),
            ..Default::default()
        }
    }

    /// The form filled in with `renter`'s details.
    pub fn from_renter(renter: &Renter) -> Self {
        Self {
            first_name: renter.first_name.clone(),
            last_name: renter.last_name.clone(),
            gender: renter.gender.clone(),
            phone: renter.phone.clone(),
            email: renter.email.clone(),
            property: renter
                .property
                .as_ref()
                .and_then(|property| property.id.as_ref())
                .map(RecordId::to_string)
                .unwrap_or_default(),
            payment_status: renter.payment_status.to_string(),
            active_status: renter.active_status.to_string(),
        }
    }

    /// Check the form and convert it for the remote API.
    ///
    /// An inactive tenant has no property and their payment status is reset to unpaid.
    pub fn validate(&self) -> Result<RenterDraft, Error> {
        let first_name = required("First name", &self.first_name)?;
        let last_name = required("Last name", &self.last_name)?;
        let phone = required("Phone", &self.phone)?;
        let email = self.email.trim();

        if !email.is_empty() && !email.contains('@') {
            return Err(Error::Validation(
                "Please enter a valid email address".to_owned(),
            ));
        }

        let gender = self.gender.trim();
        if !gender.is_empty() && !GENDERS.contains(&gender) {
            return Err(Error::Validation(format!(
                "Gender must be one of {}",
                GENDERS.join(", ")
            )));
        }

        let active_status = ActiveStatus::from_label(&self.active_status);
        let (property, payment_status) = if active_status == ActiveStatus::Inactive {
            (None, PaymentStatus::Unpaid)
        } else {
            let property = match self.property.trim() {
                "" => None,
                property => Some(parse_selected_id("property", property)?),
            };

            (property, PaymentStatus::from_label(&self.payment_status))
        };

        Ok(RenterDraft {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            gender: gender.to_owned(),
            phone: phone.to_owned(),
            email: email.to_owned(),
            property,
            payment_status,
            active_status,
        })
    }
}

pub fn tenant_form(form: &TenantForm, properties: &[Property], target: FormTarget) -> Markup {
    let genders: Vec<(String, String)> = GENDERS
        .iter()
        .map(|gender| ((*gender).to_owned(), (*gender).to_owned()))
        .collect();
    let property_options: Vec<(String, String)> = properties
        .iter()
        .map(|property| (property.id.to_string(), property.name.clone()))
        .collect();
    let submit_text = match target {
        FormTarget::Create(_) => "Add Tenant",
        FormTarget::Update(_) => "Update Tenant",
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
            (input_field("First name", "firstName", "text", &form.first_name, true))
            (input_field("Last name", "lastName", "text", &form.last_name, true))
            (select_field("Gender", "gender", &genders, &form.gender, false))
            (input_field("Phone", "phone", "tel", &form.phone, true))
            (input_field("Email", "email", "email", &form.email, false))
            (select_field("Property", "property", &property_options, &form.property, false))
            (select_field(
                "Payment status",
                "paymentStatus",
                &PaymentStatus::options(),
                &form.payment_status,
                true
            ))
            (select_field(
                "Status",
                "activeStatus",
                &ActiveStatus::options(),
                &form.active_status,
                true
            ))
            (submit_button(submit_text))
        }
    }
}
