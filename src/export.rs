//! CSV downloads of the payments, utilities and expenses lists.

use axum::{
    Extension,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{
    Error,
    app_state::RemoteState,
    auth::Session,
    expense::remote::list_expenses,
    payment::remote::list_payments,
    utility::remote::list_utilities,
};

/// Write `header` and then `rows` as CSV.
fn write_csv<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(header)
        .map_err(|error| Error::Csv(error.to_string()))?;

    for row in rows {
        writer
            .write_record(&row)
            .map_err(|error| Error::Csv(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::Csv(error.to_string()))
}

fn csv_attachment(filename: &str, csv: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

fn date_cell(date: Option<Date>) -> String {
    date.map(|date| date.to_string()).unwrap_or_default()
}

pub async fn export_payments(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let payments = match list_payments(&state.api, &session).await {
        Ok(payments) => payments,
        Err(error) => return Error::from(error).into_response(),
    };

    let rows = payments.iter().map(|payment| {
        [
            date_cell(payment.date),
            payment.renter.full_name(),
            payment.property.display_name().to_owned(),
            payment.amount.to_string(),
            payment.is_late_fee.to_string(),
            payment.description.clone(),
        ]
    });

    match write_csv(
        ["Date", "Tenant", "Property", "Amount", "Late Fee", "Description"],
        rows,
    ) {
        Ok(csv) => csv_attachment("payments.csv", csv),
        Err(error) => error.into_response(),
    }
}

pub async fn export_utilities(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let utilities = match list_utilities(&state.api, &session).await {
        Ok(utilities) => utilities,
        Err(error) => return Error::from(error).into_response(),
    };

    let rows = utilities.iter().map(|utility| {
        [
            date_cell(utility.date),
            utility.kind.clone(),
            utility.renter.full_name(),
            utility.property.display_name().to_owned(),
            utility.amount.to_string(),
            utility.description.clone(),
        ]
    });

    match write_csv(
        ["Date", "Type", "Tenant", "Property", "Amount", "Description"],
        rows,
    ) {
        Ok(csv) => csv_attachment("utilities.csv", csv),
        Err(error) => error.into_response(),
    }
}

pub async fn export_expenses(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
) -> Response {
    let expenses = match list_expenses(&state.api, &session).await {
        Ok(expenses) => expenses,
        Err(error) => return Error::from(error).into_response(),
    };

    let rows = expenses.iter().map(|expense| {
        [
            date_cell(expense.date),
            expense.kind.to_string(),
            expense.property.display_name().to_owned(),
            expense
                .renter
                .as_ref()
                .map(|renter| renter.full_name())
                .unwrap_or_default(),
            expense.amount.to_string(),
            expense.description.clone(),
        ]
    });

    match write_csv(
        ["Date", "Type", "Property", "Tenant", "Amount", "Description"],
        rows,
    ) {
        Ok(csv) => csv_attachment("expenses.csv", csv),
        Err(error) => error.into_response(),
    }
}
