use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }
    };
}

record_name!(
    /// Record name of a Client, e.g. "CLI-0042".
    ClientId
);

record_name!(
    /// Record name of a Legal Case, e.g. "CASE-2024-0007".
    CaseId
);

record_name!(
    /// Record name of a Time Entry.
    TimeEntryId
);

record_name!(
    /// The signed-in user, as the host reports it (usually an email).
    UserId
);
