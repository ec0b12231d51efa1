//! The expense form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    dates::serialize_iso,
    expense::{Expense, ExpenseType},
    html::{
        FormTarget, amount_field, input_field, select_field, submit_button, textarea_field,
    },
    property::Property,
    record_id::{RecordId, id_or_empty},
    tenant::Renter,
    validation::{parse_amount, parse_input_date, parse_selected_id},
};

/// The expense fields sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDraft {
    pub property: RecordId,
    #[serde(serialize_with = "id_or_empty")]
    pub renter: Option<RecordId>,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
    pub amount: f64,
    #[serde(serialize_with = "serialize_iso")]
    pub date: Date,
    pub description: String,
}

/// The raw expense form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseForm {
    pub property: String,
    pub renter: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Replaces "Other" when filled in.
    pub custom_type: String,
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl ExpenseForm {
    pub fn new_expense(today: Date) -> Self {
        Self {
            kind: ExpenseType::default().to_string(),
            date: today.to_string(),
            ..Default::default()
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        let (kind, custom_type) = match &expense.kind {
            ExpenseType::Other(label) => (ExpenseType::Miscellaneous.to_string(), label.clone()),
            kind => (kind.to_string(), String::new()),
        };
        let id_of = |id: Option<&RecordId>| id.map(RecordId::to_string).unwrap_or_default();

        Self {
            property: id_of(expense.property.id.as_ref()),
            renter: id_of(
                expense
                    .renter
                    .as_ref()
                    .and_then(|renter| renter.id.as_ref()),
            ),
            kind,
            custom_type,
            amount: expense.amount.to_string(),
            date: expense.date.map(|date| date.to_string()).unwrap_or_default(),
            description: expense.description.clone(),
        }
    }

    /// Check the form and convert it for the remote API.
    pub fn validate(&self) -> Result<ExpenseDraft, Error> {
        let property = parse_selected_id("property", &self.property)?;
        let renter = match self.renter.trim() {
            "" => None,
            renter => Some(parse_selected_id("tenant", renter)?),
        };

        let kind = match (ExpenseType::from_label(&self.kind), self.custom_type.trim()) {
            (ExpenseType::Miscellaneous, custom) if !custom.is_empty() => {
                ExpenseType::from_label(custom)
            }
            (kind, _) => kind,
        };

        Ok(ExpenseDraft {
            property,
            renter,
            kind,
            amount: parse_amount("Amount", &self.amount)?,
            date: parse_input_date("Date", &self.date)?,
            description: self.description.trim().to_owned(),
        })
    }
}

pub fn expense_form(
    form: &ExpenseForm,
    properties: &[Property],
    renters: &[Renter],
    target: FormTarget,
) -> Markup {
    let property_options: Vec<(String, String)> = properties
        .iter()
        .map(|property| (property.id.to_string(), property.name.clone()))
        .collect();
    let renter_options: Vec<(String, String)> = renters
        .iter()
        .map(|renter| (renter.id.to_string(), renter.full_name()))
        .collect();
    let submit_text = match target {
        FormTarget::Create(_) => "Add Expense",
        FormTarget::Update(_) => "Update Expense",
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
            (select_field("Property", "property", &property_options, &form.property, true))
            (select_field("Tenant", "renter", &renter_options, &form.renter, false))
            (select_field("Type", "type", &ExpenseType::options(), &form.kind, true))
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

    use crate::{
        Error,
        expense::{Expense, ExpenseType},
        record_id::RecordId,
    };

    use super::ExpenseForm;

    fn form() -> ExpenseForm {
        ExpenseForm {
            property: "p1".to_owned(),
            amount: "3500".to_owned(),
            kind: "Plumbing".to_owned(),
            ..ExpenseForm::new_expense(date!(2025 - 03 - 04))
        }
    }

    #[test]
    fn valid_form_without_tenant() {
        let draft = form().validate().unwrap();

        assert_eq!(draft.property, RecordId::new("p1").unwrap());
        assert_eq!(draft.renter, None);
        assert_eq!(draft.kind, ExpenseType::Plumbing);

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["renter"], "");
        assert_eq!(json["type"], "Plumbing");
        assert_eq!(json["date"], "2025-03-04");
    }

    #[test]
    fn custom_type_replaces_other() {
        let draft = ExpenseForm {
            kind: "Other".to_owned(),
            custom_type: "Roofing".to_owned(),
            ..form()
        }
        .validate()
        .unwrap();

        assert_eq!(draft.kind, ExpenseType::Other("Roofing".to_owned()));
    }

    #[test]
    fn other_without_custom_type_stays_other() {
        let draft = ExpenseForm {
            kind: "Other".to_owned(),
            ..form()
        }
        .validate()
        .unwrap();

        assert_eq!(draft.kind, ExpenseType::Miscellaneous);
    }

    #[test]
    fn rejects_missing_property_and_bad_amount() {
        for bad in [
            ExpenseForm {
                property: "".to_owned(),
                ..form()
            },
            ExpenseForm {
                amount: "-1".to_owned(),
                ..form()
            },
            ExpenseForm {
                date: "04/03/2025".to_owned(),
                ..form()
            },
        ] {
            assert!(matches!(bad.validate(), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn unknown_types_are_edited_as_other() {
        let expense: Expense = serde_json::from_str(
            r#"{"_id": "e1", "property": {"_id": "p1", "name": "Sunrise"}, "type": "Roofing", "amount": 900}"#,
        )
        .unwrap();

        let form = ExpenseForm::from_expense(&expense);

        assert_eq!(form.kind, "Other");
        assert_eq!(form.custom_type, "Roofing");
        assert_eq!(form.property, "p1");
        assert_eq!(form.renter, "");
    }
}
