use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use time::Date;

use super::{CaseId, ClientId, TimeEntryId, UserId};

pub const BILLING_RATE: &str = "billing_rate";
pub const BILLABLE_HOURS: &str = "billable_hours";
pub const BILLABLE_AMOUNT: &str = "billable_amount";

/// Fields that only apply to billable entries.
pub const BILLABLE_FIELDS: [&str; 3] = [BILLING_RATE, BILLABLE_HOURS, BILLABLE_AMOUNT];

/// Fields that stay locked until the entry has been invoiced.
pub const INVOICE_FIELDS: [&str; 2] = ["invoiced", "invoice_reference"];

/// Lock state of a document, stored by the host as 0/1/2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocStatus {
    #[default]
    Draft,
    Submitted,
    Cancelled,
}

impl TryFrom<u8> for DocStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DocStatus::Draft),
            1 => Ok(DocStatus::Submitted),
            2 => Ok(DocStatus::Cancelled),
            other => Err(format!("Unknown docstatus: {}", other)),
        }
    }
}

impl From<DocStatus> for u8 {
    fn from(status: DocStatus) -> Self {
        match status {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum BillingStatus {
    Draft,
    Approved,
    Invoiced,
    Cancelled,
}

/// Host events the time entry form reacts to, including the two
/// calculations the host can trigger by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TimeEntryTrigger {
    LegalCase,
    FromTime,
    ToTime,
    CalculateHours,
    Billable,
    BillingRate,
    BillableHours,
    CalculateBillableAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntry {
    pub name: Option<TimeEntryId>,
    pub employee: Option<UserId>,
    pub legal_case: Option<CaseId>,
    pub client: Option<ClientId>,
    pub activity_type: Option<String>,
    pub description: Option<String>,

    pub activity_date: Option<Date>,
    /// Clock time as typed, `HH:MM` or `HH:MM:SS`.
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    pub hours: Decimal,

    pub billable: bool,
    pub billing_rate: Option<Decimal>,
    pub billable_hours: Option<Decimal>,
    pub billable_amount: Decimal,

    pub docstatus: DocStatus,
    pub billing_status: Option<BillingStatus>,
    pub invoiced: bool,
    pub invoice_reference: Option<String>,
}

impl TimeEntry {
    pub fn has_times(&self) -> bool {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }
        filled(&self.from_time) && filled(&self.to_time)
    }

    /// Zeroes every derived duration and billing figure.
    pub fn reset_derived(&mut self) {
        self.hours = Decimal::ZERO;
        self.billable_hours = Some(Decimal::ZERO);
        self.billable_amount = Decimal::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docstatus_uses_host_integers() {
        let entry: TimeEntry = serde_json::from_str(r#"{"docstatus": 1}"#).unwrap();
        assert_eq!(entry.docstatus, DocStatus::Submitted);
        assert!(serde_json::from_str::<TimeEntry>(r#"{"docstatus": 7}"#).is_err());
    }

    #[test]
    fn blank_times_do_not_count_as_set() {
        let entry = TimeEntry {
            from_time: Some("09:00".into()),
            to_time: Some("  ".into()),
            ..Default::default()
        };
        assert!(!entry.has_times());
    }

    #[test]
    fn triggers_parse_from_event_names() {
        assert_eq!(
            "calculate_billable_amount".parse::<TimeEntryTrigger>().unwrap(),
            TimeEntryTrigger::CalculateBillableAmount
        );
        let name: &'static str = TimeEntryTrigger::BillableHours.into();
        assert_eq!(name, BILLABLE_HOURS);
    }
}
