//! Enums for the fixed sets of labels the remote API uses, e.g. payment statuses.
//!
//! The remote API does not enforce a schema, so a label this app does not know about
//! is kept as `Other(label)` instead of failing the whole response. A missing, null
//! or empty label becomes the enum's default.

/// Declare an enum of remote API labels with `as_str`, `from_label`, `ALL`, `Default`,
/// `Display` and serde support.
macro_rules! remote_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal,
            )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
            /// A label this app does not know about, kept as sent.
            Other(String),
        }

        impl $name {
            /// Every known value, in display order.
            pub const ALL: &[$name] = &[$($name::$variant),+];

            /// The label used by the remote API, which is also shown to the user.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(label) => label,
                }
            }

            /// Parse `label`, keeping unknown labels as `Other`.
            pub fn from_label(label: &str) -> Self {
                match label.trim() {
                    "" => Self::default(),
                    $($label => $name::$variant,)+
                    other => $name::Other(other.to_owned()),
                }
            }

            /// The known values as (value, label) pairs for a select field.
            #[allow(dead_code)]
            pub fn options() -> Vec<(String, String)> {
                Self::ALL
                    .iter()
                    .map(|value| (value.as_str().to_owned(), value.as_str().to_owned()))
                    .collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;

                Ok(label.map(|label| Self::from_label(&label)).unwrap_or_default())
            }
        }
    };
}

pub(crate) use remote_enum;
