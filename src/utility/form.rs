//! The utility charge form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    dates::serialize_iso,
    html::{
        FormTarget, amount_field, input_field, select_field, submit_button, textarea_field,
    },
    record_id::RecordId,
    utility::{UTILITY_TYPES, Utility},
    validation::{parse_amount, parse_input_date, parse_selected_id, required},
};

/// The type option that reveals the custom type field.
const CUSTOM_TYPE: &str = "Custom";

/// The utility fields sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityDraft {
    pub amount: f64,
    #[serde(serialize_with = "serialize_iso")]
    pub date: Date,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// The property's name.
    pub property: String,
}

/// The raw utility form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UtilityForm {
    pub rental_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub custom_type: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub property: String,
}

impl UtilityForm {
    pub fn new_utility(rental_id: &str, today: Date) -> Self {
        Self {
            rental_id: rental_id.to_owned(),
            date: today.to_string(),
            ..Default::default()
        }
    }

    /// The form filled in with `utility`. Types not offered in the form are shown as custom.
    pub fn from_utility(utility: &Utility) -> Self {
        let (kind, custom_type) = if UTILITY_TYPES.contains(&utility.kind.as_str()) {
            (utility.kind.clone(), String::new())
        } else {
            (CUSTOM_TYPE.to_owned(), utility.kind.clone())
        };

        Self {
            rental_id: String::new(),
            kind,
            custom_type,
            amount: utility.amount.to_string(),
            date: utility.date.map(|date| date.to_string()).unwrap_or_default(),
            description: utility.description.clone(),
            property: utility.property.name.clone(),
        }
    }

    /// Check the form and convert it for the remote API.
    ///
    /// A custom type replaces the "Custom" option.
    pub fn validate(&self) -> Result<UtilityDraft, Error> {
        let kind = if self.kind.trim() == CUSTOM_TYPE {
            required("Custom type", &self.custom_type)?
        } else {
            required("Type", &self.kind)?
        };

        Ok(UtilityDraft {
            amount: parse_amount("Amount", &self.amount)?,
            date: parse_input_date("Date", &self.date)?,
            description: self.description.trim().to_owned(),
            kind: kind.to_owned(),
            property: self.property.trim().to_owned(),
        })
    }

    pub fn rental_id(&self) -> Result<RecordId, Error> {
        parse_selected_id("rental", &self.rental_id)
    }
}

pub fn utility_form(
    form: &UtilityForm,
    rentals: Option<&[(String, String)]>,
    target: FormTarget,
) -> Markup {
    let kinds: Vec<(String, String)> = UTILITY_TYPES
        .iter()
        .chain([CUSTOM_TYPE].iter())
        .map(|kind| ((*kind).to_owned(), (*kind).to_owned()))
        .collect();
    let submit_text = match target {
        FormTarget::Create(_) => "Add Utility",
        FormTarget::Update(_) => "Update Utility",
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
            @if let Some(rentals) = rentals {
                (select_field("Rental", "rentalId", rentals, &form.rental_id, true))
            } @else {
                input type="hidden" name="property" value=(form.property);
            }

            (select_field("Type", "type", &kinds, &form.kind, true))
            (input_field("Custom type", "customType", "text", &form.custom_type, false))
            (amount_field("Amount", "amount", &form.amount))
            (input_field("Date", "date", "date", &form.date, true))
            (textarea_field("Description", "description", &form.description))
            (submit_button(submit_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, utility::Utility};

    use super::UtilityForm;

    #[test]
    fn custom_type_replaces_custom_option() {
        let form = UtilityForm {
            kind: "Custom".to_owned(),
            custom_type: "Internet".to_owned(),
            amount: "2500".to_owned(),
            ..UtilityForm::new_utility("r1", date!(2025 - 03 - 01))
        };

        let draft = form.validate().unwrap();

        assert_eq!(draft.kind, "Internet");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "Internet");
        assert_eq!(json["date"], "2025-03-01");
    }

    #[test]
    fn custom_option_needs_a_custom_type() {
        let form = UtilityForm {
            kind: "Custom".to_owned(),
            amount: "2500".to_owned(),
            ..UtilityForm::new_utility("r1", date!(2025 - 03 - 01))
        };

        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn unknown_types_are_edited_as_custom() {
        let utility: Utility = serde_json::from_str(
            r#"{"_id": "u1", "type": "Internet", "amount": 2500, "property": {"_id": "p1", "name": "Sunrise"}}"#,
        )
        .unwrap();

        let form = UtilityForm::from_utility(&utility);

        assert_eq!(form.kind, "Custom");
        assert_eq!(form.custom_type, "Internet");
        assert_eq!(form.property, "Sunrise");
    }
}
