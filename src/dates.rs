//! Lenient parsing and display of the dates the remote API sends.
//!
//! The remote API stores dates as ISO-8601 strings, sometimes as full
//! timestamps ("2025-03-01T00:00:00.000Z") and sometimes as plain dates
//! ("2025-03-01"). A value that cannot be parsed is treated as a missing date.

use time::{
    Date, OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Date format used in messages to tenants, e.g. "05-03-2025".
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]-[month]-[year]");

/// Heading format for a group of records on the same day, e.g. "Saturday, 1 Mar".
const GROUP_HEADING_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday], [day padding:none] [month repr:short]");

/// Parse a date sent by the remote API, returning `None` if it is empty or invalid.
///
/// Timestamps are converted to UTC before the date is taken.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();

    if raw.is_empty() {
        return None;
    }

    if let Ok(date_time) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(date_time.to_offset(UtcOffset::UTC).date());
    }

    raw.get(..10)
        .and_then(|prefix| Date::parse(prefix, ISO_DATE_FORMAT).ok())
}

/// Format `date` as "dd-MM-yyyy".
pub fn format_day_month_year(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format `date` as a heading for the records on that day, e.g. "Saturday, 1 Mar".
pub fn format_group_heading(date: Date) -> String {
    date.format(GROUP_HEADING_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serialize `date` as "YYYY-MM-DD", the format the remote API accepts.
pub fn serialize_iso<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(date)
}

/// Serde adapter for optional dates that never fails on bad input.
pub mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::parse_date;

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(date),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;

        Ok(raw.as_deref().and_then(parse_date))
    }
}
