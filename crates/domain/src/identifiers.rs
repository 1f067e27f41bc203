//! Opaque identifiers used by the permission model.
//!
//! Module, action and field identifiers are plain strings on the wire but
//! distinct types in code, so a field name can never be looked up in the
//! action universe by accident.

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.0.as_str())
            }
        }
    };
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

string_identifier!(
    /// Functional area subject to access control, e.g. `Task Management`.
    ModuleName
);

string_identifier!(
    /// Operation on a module, e.g. `VIEW` or `DELETE`.
    ActionId
);

string_identifier!(
    /// Data field that can be narrowed away from a granted action.
    FieldId
);

uuid_identifier!(
    /// Unique identifier for an access grant.
    AccessGrantId
);

uuid_identifier!(
    /// Unique identifier for a role.
    RoleId
);

uuid_identifier!(
    /// Unique identifier for a user record.
    UserId
);

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{AccessGrantId, ActionId, ModuleName};

    #[test]
    fn string_identifiers_serialize_as_plain_strings() {
        let module = ModuleName::new("Task Management");
        let encoded = serde_json::to_string(&module).unwrap_or_default();
        assert_eq!(encoded, "\"Task Management\"");
    }

    #[test]
    fn string_identifiers_are_borrowable_as_str() {
        let actions = BTreeSet::from([ActionId::from("VIEW"), ActionId::from("DELETE")]);
        assert!(actions.contains("VIEW"));
        assert!(!actions.contains("CREATE"));
    }

    #[test]
    fn uuid_identifiers_format_as_uuid() {
        assert_eq!(AccessGrantId::new().to_string().len(), 36);
    }
}
