use thiserror::Error;

/// A blocking validation failure. Aborts the save; the message is shown to
/// the user as is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    // Client
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Date of Incorporation is required for a Corporation.")]
    MissingIncorporationDate,
    #[error("Please enter a valid mobile number")]
    InvalidMobile,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Date of Birth cannot be in the future")]
    BirthDateInFuture,
    #[error("Please enter a valid SSN format (XXX-XX-XXXX)")]
    InvalidSsn,
    #[error("Credit Limit cannot be negative")]
    NegativeCreditLimit,
    #[error("Tax Rate must be between 0 and 100")]
    TaxRateOutOfRange,
    #[error("Discount Percentage must be between 0 and 100")]
    DiscountOutOfRange,

    // Legal case
    #[error("Date Closed cannot be before Date Opened.")]
    ClosedBeforeOpened,
    #[error("Expected Close Date cannot be before Date Opened.")]
    ExpectedCloseBeforeOpened,
    #[error("Statute of Limitations cannot be in the past for an active case.")]
    StatuteOfLimitationsPassed,
    #[error("{field} is required for the {method} billing method.")]
    MissingBillingAmount {
        field: &'static str,
        method: &'static str,
    },

    // Time entry
    #[error("Please provide a more detailed description of the activity (at least 5 characters).")]
    DescriptionTooShort,
    #[error("Time entry must be for a duration greater than zero.")]
    ZeroDuration,
    #[error("Activity Type is required for time entry.")]
    MissingActivityType,
    #[error("Billing Rate must be a positive number for billable entries.")]
    NonPositiveBillingRate,
    #[error("Billable Hours must be a positive number for billable entries.")]
    NonPositiveBillableHours,
    #[error("Billable Amount must be calculated correctly for billable entries.")]
    BillableAmountNotCalculated,
}

/// Errors from fetching a field of a related record.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{doctype} '{name}' not found")]
    NotFound { doctype: &'static str, name: String },
    #[error("lookup unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Errors from turning a date and two clock times into a duration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid time '{0}'")]
    InvalidTime(String),
    #[error("end of '{0}' falls outside the supported calendar")]
    OutOfRange(String),
}
