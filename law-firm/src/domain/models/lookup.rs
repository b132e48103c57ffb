use rust_decimal::Decimal;

use super::{CaseId, ClientId};

/// A related-record field fetch requested by a trigger. The adapter resolves
/// it and hands the answer back to the same form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingLookup {
    /// `Client.billing_rate` of the selected client.
    ClientBillingRate { client: ClientId },
    /// `Legal Case.client` of the selected case.
    CaseClient { legal_case: CaseId },
}

/// The answer to a [`PendingLookup`]. `None` means the record or the field
/// was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    BillingRate(Option<Decimal>),
    CaseClient(Option<ClientId>),
}
