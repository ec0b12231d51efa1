//! The payment form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    dates::serialize_iso,
    html::{
        FormTarget, amount_field, checkbox_field, input_field, select_field, submit_button,
        textarea_field,
    },
    payment::Payment,
    record_id::RecordId,
    validation::{parse_amount, parse_input_date, parse_selected_id},
};

/// The payment fields sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub amount: f64,
    #[serde(serialize_with = "serialize_iso")]
    pub date: Date,
    pub is_late_fee: bool,
    pub description: String,
}

/// The raw payment form as submitted by the browser.
///
/// `rental_id` is only used when recording a new payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentForm {
    pub rental_id: String,
    pub amount: String,
    pub date: String,
    pub is_late_fee: String,
    pub description: String,
}

impl PaymentForm {
    /// An empty form dated `today`.
    pub fn new_payment(rental_id: &str, today: Date) -> Self {
        Self {
            rental_id: rental_id.to_owned(),
            date: today.to_string(),
            ..Default::default()
        }
    }

    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            rental_id: String::new(),
            amount: payment.amount.to_string(),
            date: payment.date.map(|date| date.to_string()).unwrap_or_default(),
            is_late_fee: payment.is_late_fee.to_string(),
            description: payment.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<PaymentDraft, Error> {
        Ok(PaymentDraft {
            amount: parse_amount("Amount", &self.amount)?,
            date: parse_input_date("Date", &self.date)?,
            is_late_fee: self.is_late_fee == "true",
            description: self.description.trim().to_owned(),
        })
    }

    /// The rental a new payment is recorded against.
    pub fn rental_id(&self) -> Result<RecordId, Error> {
        parse_selected_id("rental", &self.rental_id)
    }
}

/// The payment form. Pass `rentals` as select options to let the user pick the rental.
pub fn payment_form(
    form: &PaymentForm,
    rentals: Option<&[(String, String)]>,
    target: FormTarget,
) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Record Payment",
        FormTarget::Update(_) => "Update Payment",
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
            }

            (amount_field("Amount", "amount", &form.amount))
            (input_field("Date", "date", "date", &form.date, true))
            (checkbox_field("Late fee", "isLateFee", form.is_late_fee == "true"))
            (textarea_field("Description", "description", &form.description))
            (submit_button(submit_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::PaymentForm;

    #[test]
    fn valid_form() {
        let form = PaymentForm {
            amount: "7500.50".to_owned(),
            is_late_fee: "true".to_owned(),
            description: " March rent ".to_owned(),
            ..PaymentForm::new_payment("r1", date!(2025 - 03 - 01))
        };

        let draft = form.validate().unwrap();

        assert_eq!(draft.amount, 7500.5);
        assert_eq!(draft.date, date!(2025 - 03 - 01));
        assert!(draft.is_late_fee);
        assert_eq!(draft.description, "March rent");
        assert_eq!(
            serde_json::to_value(&draft).unwrap()["date"],
            "2025-03-01"
        );
    }

    #[test]
    fn unchecked_box_is_not_a_late_fee() {
        let form = PaymentForm {
            amount: "100".to_owned(),
            ..PaymentForm::new_payment("r1", date!(2025 - 03 - 01))
        };

        assert!(!form.validate().unwrap().is_late_fee);
    }

    #[test]
    fn invalid_amounts_and_dates_are_rejected() {
        for (amount, date) in [("", "2025-03-01"), ("NaN", "2025-03-01"), ("10", "01/03/2025")] {
            let form = PaymentForm {
                amount: amount.to_owned(),
                date: date.to_owned(),
                ..Default::default()
            };

            assert!(matches!(form.validate(), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn rental_must_be_chosen() {
        let form = PaymentForm::new_payment("", date!(2025 - 03 - 01));

        assert!(matches!(form.rental_id(), Err(Error::Validation(_))));
    }
}
