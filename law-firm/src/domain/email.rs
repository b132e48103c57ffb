use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("local part pattern is valid")
});

static DOMAIN_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").expect("domain label pattern is valid")
});

/// A client contact address that passed format validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("'{0}' is not a valid email: must contain exactly one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: invalid local part")]
    InvalidLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    /// Validates an address as typed into the form. Surrounding whitespace
    /// is ignored.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        let Some((local, domain)) = value.split_once('@') else {
            return Err(EmailError::InvalidFormat(value.to_string()));
        };
        if domain.contains('@') {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        if !LOCAL_PART.is_match(local) {
            return Err(EmailError::InvalidLocalPart(value.to_string()));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || !labels.iter().all(|label| DOMAIN_LABEL.is_match(label)) {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
