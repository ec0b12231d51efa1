//! Checks applied to submitted forms before anything is sent to the remote API.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, record_id::RecordId};

const INPUT_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Return the trimmed `value`, or a validation error naming `field` if it is blank.
pub fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, Error> {
    let value = value.trim();

    if value.is_empty() {
        Err(Error::Validation(format!("{field} is required")))
    } else {
        Ok(value)
    }
}

/// Parse a monetary amount entered in a form.
///
/// Amounts must be finite and not negative.
pub fn parse_amount(field: &str, value: &str) -> Result<f64, Error> {
    let value = required(field, value)?;

    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(Error::Validation(format!(
            "{field} must be a number that is zero or more"
        ))),
    }
}

/// Parse a date from an `<input type="date">` field ("YYYY-MM-DD").
pub fn parse_input_date(field: &str, value: &str) -> Result<Date, Error> {
    let value = required(field, value)?;

    Date::parse(value, INPUT_DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("{field} must be a date (YYYY-MM-DD)")))
}

/// Parse an optional date field, treating a blank value as no date.
pub fn parse_optional_input_date(field: &str, value: &str) -> Result<Option<Date>, Error> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_input_date(field, value).map(Some)
    }
}

/// Parse the ID of a record chosen in a select field.
pub fn parse_selected_id(field: &str, value: &str) -> Result<RecordId, Error> {
    let value = required(field, value)?;

    RecordId::new(value).map_err(|_| Error::Validation(format!("Choose a valid {field}")))
}
