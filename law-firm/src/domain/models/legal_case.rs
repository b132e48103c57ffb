use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use time::Date;

use super::{CaseId, ClientId};

/// Every amount field the billing method selects between.
pub const BILLING_AMOUNT_FIELDS: [&str; 4] = [
    "hourly_rate",
    "flat_fee_amount",
    "contingency_percentage",
    "retainer_amount",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CaseStatus {
    Open,
    #[strum(serialize = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[strum(serialize = "On Hold")]
    #[serde(rename = "On Hold")]
    OnHold,
    Closed,
    Settled,
    Dismissed,
    /// Set when the case document is cancelled.
    Cancelled,
}

impl CaseStatus {
    /// No further activity is expected on the case.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatus::Closed | CaseStatus::Settled | CaseStatus::Dismissed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CasePriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
pub enum BillingMethod {
    Hourly,
    #[strum(serialize = "Flat Fee")]
    #[serde(rename = "Flat Fee")]
    FlatFee,
    Contingency,
    Retainer,
}

impl BillingMethod {
    /// The single amount field shown for this method.
    pub fn amount_field(&self) -> &'static str {
        match self {
            BillingMethod::Hourly => "hourly_rate",
            BillingMethod::FlatFee => "flat_fee_amount",
            BillingMethod::Contingency => "contingency_percentage",
            BillingMethod::Retainer => "retainer_amount",
        }
    }

    /// Label of [`Self::amount_field`] for messages.
    pub fn amount_label(&self) -> &'static str {
        match self {
            BillingMethod::Hourly => "Hourly Rate",
            BillingMethod::FlatFee => "Flat Fee Amount",
            BillingMethod::Contingency => "Contingency Percentage",
            BillingMethod::Retainer => "Retainer Amount",
        }
    }
}

/// Host events the legal case form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LegalCaseTrigger {
    Status,
    BillingMethod,
    Client,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalCase {
    pub name: Option<CaseId>,
    pub case_title: Option<String>,
    pub client: Option<ClientId>,
    pub status: Option<CaseStatus>,
    pub priority: Option<CasePriority>,

    pub date_opened: Option<Date>,
    pub date_closed: Option<Date>,
    pub expected_close_date: Option<Date>,
    pub statute_of_limitations: Option<Date>,

    pub billing_method: Option<BillingMethod>,
    pub hourly_rate: Option<Decimal>,
    pub flat_fee_amount: Option<Decimal>,
    pub contingency_percentage: Option<Decimal>,
    pub retainer_amount: Option<Decimal>,
}

impl LegalCase {
    /// The amount recorded for `method`, if any.
    pub fn billing_amount(&self, method: BillingMethod) -> Option<Decimal> {
        match method {
            BillingMethod::Hourly => self.hourly_rate,
            BillingMethod::FlatFee => self.flat_fee_amount,
            BillingMethod::Contingency => self.contingency_percentage,
            BillingMethod::Retainer => self.retainer_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = [
            CaseStatus::Open,
            CaseStatus::InProgress,
            CaseStatus::OnHold,
            CaseStatus::Closed,
            CaseStatus::Settled,
            CaseStatus::Dismissed,
            CaseStatus::Cancelled,
        ]
        .into_iter()
        .filter(CaseStatus::is_terminal)
        .collect();
        assert_eq!(
            terminal,
            vec![CaseStatus::Closed, CaseStatus::Settled, CaseStatus::Dismissed]
        );
    }

    #[test]
    fn each_method_owns_a_distinct_amount_field() {
        let methods = [
            BillingMethod::Hourly,
            BillingMethod::FlatFee,
            BillingMethod::Contingency,
            BillingMethod::Retainer,
        ];
        let fields: Vec<_> = methods.iter().map(BillingMethod::amount_field).collect();
        assert_eq!(fields, BILLING_AMOUNT_FIELDS);
    }

    #[test]
    fn methods_parse_from_host_labels() {
        assert_eq!("Flat Fee".parse::<BillingMethod>().unwrap(), BillingMethod::FlatFee);
        assert_eq!(BillingMethod::FlatFee.to_string(), "Flat Fee");
        let method: BillingMethod = serde_json::from_str("\"Flat Fee\"").unwrap();
        assert_eq!(method, BillingMethod::FlatFee);
    }
}
