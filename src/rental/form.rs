//! The rental form shared by the create and edit pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    dates,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormTarget, amount_field, format_currency,
        input_field, select_field, submit_button, textarea_field,
    },
    projections::rental_duration_label,
    property::{Property, RentalType},
    record_id::RecordId,
    rental::{Rental, RentalStatus, RentalUtility},
    tenant::Renter,
    utility::UTILITY_TYPES,
    validation::{parse_amount, parse_input_date, parse_optional_input_date, parse_selected_id},
};

/// Blank utility lines shown below the saved ones.
const BLANK_UTILITY_LINES: usize = 2;

/// The rental fields sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDraft {
    pub property: RecordId,
    pub renter: RecordId,
    #[serde(with = "dates::lenient")]
    pub rental_start_date: Option<Date>,
    #[serde(with = "dates::lenient")]
    pub rental_end_date: Option<Date>,
    #[serde(with = "dates::lenient")]
    pub payment_cycle: Option<Date>,
    pub rental_frequency: RentalType,
    pub duration: String,
    pub amount: f64,
    pub deposit: f64,
    pub description: String,
    pub status: RentalStatus,
    pub utilities: Vec<RentalUtility>,
    pub utilities_total: f64,
}

impl RentalDraft {
    /// Check that the rent and frequency agree with what `property` charges.
    pub fn check_against(&self, property: &Property) -> Result<(), Error> {
        if self.amount != property.rent_paid {
            return Err(Error::Validation(
                "Rental amount must match the property's rent price".to_owned(),
            ));
        }

        if self.rental_frequency != property.rental_type {
            return Err(Error::Validation(
                "Rental frequency must match the property's rental type".to_owned(),
            ));
        }

        Ok(())
    }
}

/// The raw rental form as submitted by the browser.
///
/// Utility lines arrive as repeated `utilityType` and `utilityAmount` fields,
/// so this must be extracted with `axum_extra::extract::Form`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalForm {
    pub property: String,
    pub renter: String,
    pub rental_start_date: String,
    pub rental_end_date: String,
    pub payment_cycle: String,
    pub rental_frequency: String,
    pub amount: String,
    pub deposit: String,
    pub description: String,
    pub status: String,
    pub utility_type: Vec<String>,
    pub utility_amount: Vec<String>,
}

impl RentalForm {
    pub fn new_rental() -> Self {
        Self {
            rental_frequency: RentalType::Monthly.to_string(),
            status: RentalStatus::Rented.to_string(),
            ..Default::default()
        }
    }

    pub fn from_rental(rental: &Rental) -> Self {
        let date = |date: Option<Date>| date.map(|date| date.to_string()).unwrap_or_default();

        Self {
            property: id_or_blank(rental.property.id.as_ref()),
            renter: id_or_blank(rental.renter.id.as_ref()),
            rental_start_date: date(rental.rental_start_date),
            rental_end_date: date(rental.rental_end_date),
            payment_cycle: date(rental.payment_cycle),
            rental_frequency: rental.rental_frequency.to_string(),
            amount: rental.amount.to_string(),
            deposit: rental.deposit.to_string(),
            description: rental.description.clone(),
            status: rental.status.to_string(),
            utility_type: rental
                .utilities
                .iter()
                .map(|utility| utility.kind.clone())
                .collect(),
            utility_amount: rental
                .utilities
                .iter()
                .map(|utility| utility.amount.to_string())
                .collect(),
        }
    }

    /// Check the form and convert it for the remote API.
    ///
    /// The payment cycle defaults to the start date and the duration is
    /// derived from the dates and frequency.
    pub fn validate(&self) -> Result<RentalDraft, Error> {
        let property = parse_selected_id("property", &self.property)?;
        let renter = parse_selected_id("tenant", &self.renter)?;
        let start = parse_input_date("Start date", &self.rental_start_date)?;
        let end = parse_optional_input_date("End date", &self.rental_end_date)?;
        let payment_cycle = parse_optional_input_date("Payment cycle", &self.payment_cycle)?;
        let amount = parse_amount("Amount", &self.amount)?;
        let deposit = if self.deposit.trim().is_empty() {
            0.0
        } else {
            parse_amount("Deposit", &self.deposit)?
        };

        if end.is_some_and(|end| end < start) {
            return Err(Error::Validation(
                "End date must not be before the start date".to_owned(),
            ));
        }

        let rental_frequency = RentalType::from_label(&self.rental_frequency);
        let duration = end
            .map(|end| rental_duration_label(start, end, &rental_frequency))
            .unwrap_or_default();
        let utilities = self.utilities()?;
        let utilities_total = utilities.iter().map(|utility| utility.amount).sum();

        Ok(RentalDraft {
            property,
            renter,
            rental_start_date: Some(start),
            rental_end_date: end,
            payment_cycle: payment_cycle.or(Some(start)),
            rental_frequency,
            duration,
            amount,
            deposit,
            description: self.description.trim().to_owned(),
            status: RentalStatus::from_label(&self.status),
            utilities,
            utilities_total,
        })
    }

    /// The filled in utility lines. A line with neither a type nor an amount is ignored.
    fn utilities(&self) -> Result<Vec<RentalUtility>, Error> {
        let mut utilities = Vec::new();

        for (index, kind) in self.utility_type.iter().enumerate() {
            let amount = self
                .utility_amount
                .get(index)
                .map(String::as_str)
                .unwrap_or_default();

            if kind.trim().is_empty() && amount.trim().is_empty() {
                continue;
            }

            if kind.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "Utility line {} needs a type",
                    index + 1
                )));
            }

            utilities.push(RentalUtility {
                kind: kind.trim().to_owned(),
                amount: parse_amount(&format!("{} amount", kind.trim()), amount)?,
            });
        }

        Ok(utilities)
    }
}

/// Current rentals as select options labelled "Tenant - Property".
pub fn rental_options(rentals: &[Rental]) -> Vec<(String, String)> {
    rentals
        .iter()
        .filter(|rental| rental.status == RentalStatus::Rented)
        .map(|rental| {
            (
                rental.id.to_string(),
                format!(
                    "{} - {}",
                    rental.renter.full_name(),
                    rental.property.display_name()
                ),
            )
        })
        .collect()
}

fn id_or_blank(id: Option<&RecordId>) -> String {
    id.map(RecordId::to_string).unwrap_or_default()
}

pub fn rental_form(
    form: &RentalForm,
    properties: &[Property],
    renters: &[Renter],
    target: FormTarget,
) -> Markup {
    let property_options: Vec<(String, String)> = properties
        .iter()
        .map(|property| {
            (
                property.id.to_string(),
                format!(
                    "{} ({} {})",
                    property.name,
                    format_currency(property.rent_paid),
                    property.rental_type
                ),
            )
        })
        .collect();
    let renter_options: Vec<(String, String)> = renters
        .iter()
        .map(|renter| (renter.id.to_string(), renter.full_name()))
        .collect();
    let utility_options: Vec<(String, String)> = UTILITY_TYPES
        .iter()
        .chain(["Other"].iter())
        .map(|kind| ((*kind).to_owned(), (*kind).to_owned()))
        .collect();
    let blank_lines = vec![(String::new(), String::new()); BLANK_UTILITY_LINES];
    let utility_lines = form
        .utility_type
        .iter()
        .cloned()
        .zip(form.utility_amount.iter().cloned())
        .chain(blank_lines);
    let submit_text = match target {
        FormTarget::Create(_) => "Add Rental",
        FormTarget::Update(_) => "Update Rental",
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
            (select_field("Tenant", "renter", &renter_options, &form.renter, true))
            (input_field("Start date", "rentalStartDate", "date", &form.rental_start_date, true))
            (input_field("End date", "rentalEndDate", "date", &form.rental_end_date, false))
            (input_field("Payment cycle", "paymentCycle", "date", &form.payment_cycle, false))
            (select_field(
                "Rental frequency",
                "rentalFrequency",
                &RentalType::options(),
                &form.rental_frequency,
                true
            ))
            (amount_field("Amount", "amount", &form.amount))
            (amount_field("Deposit", "deposit", &form.deposit))
            (select_field("Status", "status", &RentalStatus::options(), &form.status, true))
            (textarea_field("Description", "description", &form.description))

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Utilities" }

                @for (kind, amount) in utility_lines {
                    div class="flex gap-2"
                    {
                        select name="utilityType" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected[kind.is_empty()] { "Select utility type" }

                            @for (value, text) in &utility_options {
                                option value=(value) selected[*value == kind] { (text) }
                            }
                        }

                        input
                            type="number"
                            name="utilityAmount"
                            value=(amount)
                            step="0.01"
                            min="0"
                            placeholder="Amount"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }
            }

            (submit_button(submit_text))
        }
    }
}
