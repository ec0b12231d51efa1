//! The identifier the remote API assigns to each record.

use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};

/// An opaque record identifier, e.g. "66f1c0a2b4e5d6a7b8c9d0e1".
///
/// IDs are interpolated into remote API paths, so only ASCII letters, digits,
/// '-' and '_' are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate `id` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an [InvalidRecordId] if `id` is empty or contains characters
    /// that are not allowed in a path segment.
    pub fn new(id: &str) -> Result<Self, InvalidRecordId> {
        let is_valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if is_valid {
            Ok(Self(id.to_owned()))
        } else {
            Err(InvalidRecordId(id.to_owned()))
        }
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidRecordId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Serialize an optional reference as the ID, or an empty string for no reference.
///
/// Use with `#[serde(serialize_with = "crate::record_id::id_or_empty")]`.
pub(crate) fn id_or_empty<S: Serializer>(
    id: &Option<RecordId>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(id.as_ref().map(RecordId::as_str).unwrap_or_default())
}

/// A string that cannot be used as a [RecordId].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid record ID")]
pub struct InvalidRecordId(String);
