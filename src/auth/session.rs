//! The signed-in administrator's session and its cookie.
//!
//! The session is stored as JSON in a private (encrypted and signed) cookie
//! under a fixed name together with its expiry. There is no other copy of the
//! session: handlers receive it explicitly from the auth middleware.
//!
//! Lifecycle:
//! - [save_session] on successful sign-in,
//! - [load_session] on every protected request,
//! - [clear_session] on sign-out.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// The name of the cookie holding the session.
pub(crate) const COOKIE_USER_INFO: &str = "user_info";

/// The default duration for which a session cookie is valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

/// The user info returned by the remote API on sign-in.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The administrator's display name, used to sign reminder messages.
    pub name: String,
    /// The administrator's email address.
    pub email: String,
    /// The bearer token sent with every remote API request.
    pub token: String,
    /// The administrator's role, e.g. "Admin".
    #[serde(default)]
    pub role: String,
    /// The user's ID on the remote API.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the remote API considers this user an administrator.
    #[serde(rename = "isAdmin", default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("token", &"********")
            .field("role", &self.role)
            .field("id", &self.id)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

mod datetime_format {
    //! Serializes the expiry with two-digit hours so that midnight round trips.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    /// Date time format for the session expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
    const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
             sign:mandatory]:[offset_minute]:[offset_second]"
    );

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = dt
            .format(DATE_TIME_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The cookie payload: the session plus when it stops being valid.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    user: Session,
    #[serde(with = "datetime_format")]
    expires_at: OffsetDateTime,
}

fn session_cookie(value: String, expires_at: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((COOKIE_USER_INFO, value))
        .path("/")
        .expires(expires_at)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

fn write_session(
    jar: PrivateCookieJar,
    session: &Session,
    expires_at: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(&StoredSession {
        user: session.clone(),
        expires_at,
    })
    .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(session_cookie(value, expires_at)))
}

fn read_session(jar: &PrivateCookieJar) -> Result<StoredSession, Error> {
    let cookie = jar.get(COOKIE_USER_INFO).ok_or(Error::CookieMissing)?;

    serde_json::from_str(cookie.value_trimmed())
        .map_err(|error| Error::InvalidSessionCookie(error.to_string()))
}

/// Add the session cookie to `jar`, valid for `duration` from now.
///
/// # Errors
///
/// Returns an error if the expiry overflows or the session cannot be serialized.
pub fn save_session(
    jar: PrivateCookieJar,
    session: &Session,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::SessionExpiry(format!("{duration} is too long")))?;

    write_session(jar, session, expires_at)
}

/// Get the session from `jar` if it has one and it has not expired.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no session cookie,
/// - [Error::InvalidSessionCookie] if the cookie cannot be decoded,
/// - [Error::SessionExpired] if the session's expiry has passed.
pub fn load_session(jar: &PrivateCookieJar) -> Result<Session, Error> {
    let stored = read_session(jar)?;

    if stored.expires_at <= OffsetDateTime::now_utc() {
        return Err(Error::SessionExpired);
    }

    Ok(stored.user)
}

/// Set the session to expire at the later of its current expiry and now plus `duration`.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
pub fn extend_session(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let stored = read_session(&jar)?;
    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::SessionExpiry(format!("{duration} is too long")))?;

    write_session(jar, &stored.user, max(stored.expires_at, new_expiry))
}

/// Replace the session cookie with an expired one, which deletes it on the client side.
pub fn clear_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut cookie = session_cookie("deleted".to_owned(), OffsetDateTime::UNIX_EPOCH);
    cookie.set_max_age(Duration::ZERO);

    jar.add(cookie)
}
