//! Payment reminders sent to tenants by email, SMS or WhatsApp.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    alert::Alert,
    app_state::RemoteState,
    auth::Session,
    dates::format_day_month_year,
    record_id::RecordId,
    rental::{Rental, remote::get_rental},
    tenant::PaymentStatus,
};

/// The characters `encodeURIComponent` leaves alone, besides letters and digits.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How a reminder reaches the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
    WhatsApp,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::Sms, Channel::WhatsApp];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Sms => "SMS",
            Channel::WhatsApp => "WhatsApp",
        }
    }
}

/// The reminder for a tenant whose payment status is `status`.
///
/// `dues` is shown as "KES {dues}" and `deadline` as "dd-MM-yyyy". The message
/// is signed by `sender`, the signed-in administrator.
pub fn reminder_message(
    status: Option<&PaymentStatus>,
    first_name: &str,
    property: &str,
    dues: f64,
    deadline: Option<Date>,
    sender: &str,
) -> String {
    let due_date = deadline
        .map(format_day_month_year)
        .unwrap_or_else(|| "N/A".to_owned());

    let (subject, body) = match status {
        Some(PaymentStatus::Paid) => (
            format!("Payment Confirmation for {property}"),
            format!(
                "We confirm that your rent payment for {property} has been successfully \
                received. Thank you for your timely payment.\n\n\
                If you need any further assistance, feel free to reach out.\n\n"
            ),
        ),
        Some(PaymentStatus::PartiallyPaid) => (
            format!("Partial Rent Payment for {property}"),
            format!(
                "We have received a partial payment for your rent at {property}. \
                The remaining balance is KES {dues}, due by {due_date}.\n\n\
                Kindly complete the payment to avoid penalties. If you have any concerns, \
                please reach out.\n\n"
            ),
        ),
        Some(PaymentStatus::Pending) => (
            format!("Rent Payment Reminder for {property}"),
            format!(
                "This is a gentle reminder that your rent payment for {property} is pending.\n\n\
                Amount Due: KES {dues}\n\
                Due Date: {due_date}\n\n\
                Kindly ensure payment is made on time to avoid any late fees.\n\n"
            ),
        ),
        Some(PaymentStatus::Overdue) => (
            format!("Urgent - Overdue Rent Payment for {property}"),
            format!(
                "We would like to inform you that your rent payment for {property} is overdue.\n\n\
                Outstanding Amount: KES {dues}\n\
                Due Date: {due_date}\n\n\
                To avoid further penalties or legal action, please settle the payment \
                immediately. If you have already made the payment, kindly disregard this \
                message.\n\n"
            ),
        ),
        other => (
            format!("Rent Payment Status for {property}"),
            format!(
                "Please be informed that your rent payment status for {property} is recorded \
                as {}.\n\n\
                If you have any questions or need assistance, feel free to reach out.\n\n",
                other.map(PaymentStatus::as_str).unwrap_or("unknown")
            ),
        ),
    };

    format!(
        "Subject: {subject}\n\n\
        Dear {first_name},\n\n\
        {body}\
        Best regards,\n\
        {sender}\n\
        RentaHub"
    )
}

/// The reminder for the tenant of `rental`.
pub fn rental_reminder(rental: &Rental, sender: &str) -> String {
    reminder_message(
        rental.renter.payment_status.as_ref(),
        &rental.renter.first_name,
        rental.property.display_name(),
        rental.dues,
        rental.deadline,
        sender,
    )
}

/// A link that opens `message` addressed to `contact` in the app for `channel`.
///
/// `contact` is an email address for [Channel::Email] and a phone number otherwise.
pub fn reminder_link(channel: Channel, contact: &str, message: &str) -> String {
    let message = utf8_percent_encode(message, URI_COMPONENT);

    match channel {
        Channel::Email => format!("mailto:{contact}?body={message}"),
        Channel::Sms => format!("sms:{contact}?body={message}"),
        Channel::WhatsApp => {
            let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
            format!("https://wa.me/{digits}?text={message}")
        }
    }
}

/// The reminder links available for `rental`, skipping channels the tenant has no contact for.
pub fn rental_reminder_links(rental: &Rental, sender: &str) -> Vec<(Channel, String)> {
    let message = rental_reminder(rental, sender);

    Channel::ALL
        .into_iter()
        .filter_map(|channel| {
            let contact = match channel {
                Channel::Email => &rental.renter.email,
                Channel::Sms | Channel::WhatsApp => &rental.renter.phone,
            };

            (!contact.trim().is_empty())
                .then(|| (channel, reminder_link(channel, contact.trim(), &message)))
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct SmsRequest<'a> {
    phone: &'a str,
    message: &'a str,
}

/// Send the payment reminder for `rental_id` to its tenant by SMS through the remote API.
pub async fn send_sms_reminder_endpoint(
    State(state): State<RemoteState>,
    Extension(session): Extension<Session>,
    Path(rental_id): Path<RecordId>,
) -> Response {
    let rental = match get_rental(&state.api, &session, &rental_id).await {
        Ok(rental) => rental,
        Err(error) => return Error::from(error).into_alert_response(),
    };

    let phone = rental.renter.phone.trim();
    if phone.is_empty() {
        return Error::Validation(format!("{} has no phone number", rental.renter.full_name()))
            .into_alert_response();
    }

    let message = rental_reminder(&rental, &session.name);
    let request = SmsRequest {
        phone,
        message: &message,
    };

    if let Err(error) = state
        .api
        .submit_json(
            Method::POST,
            "/api/admin/send-sms",
            &request,
            Some(&session),
        )
        .await
    {
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Sent an SMS reminder for rental {rental_id}");

    Alert::SuccessSimple {
        message: format!("Reminder sent to {}", rental.renter.full_name()),
    }
    .into_response()
}
