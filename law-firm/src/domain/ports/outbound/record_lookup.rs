use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    models::{CaseId, ClientId, LookupResult, PendingLookup},
    LookupError,
};

/// Outbound port for reading a single field of a related record.
///
/// `Ok(None)` means the record exists but the field is empty; a missing
/// record may be reported either that way or as [`LookupError::NotFound`].
#[async_trait]
pub trait RecordLookup: Send + Sync + 'static {
    /// `Client.billing_rate`.
    async fn client_billing_rate(&self, client: &ClientId)
        -> Result<Option<Decimal>, LookupError>;

    /// `Legal Case.client`.
    async fn case_client(&self, legal_case: &CaseId) -> Result<Option<ClientId>, LookupError>;

    /// Answers whichever lookup a form asked for.
    async fn resolve(&self, lookup: &PendingLookup) -> Result<LookupResult, LookupError> {
        match lookup {
            PendingLookup::ClientBillingRate { client } => self
                .client_billing_rate(client)
                .await
                .map(LookupResult::BillingRate),
            PendingLookup::CaseClient { legal_case } => self
                .case_client(legal_case)
                .await
                .map(LookupResult::CaseClient),
        }
    }
}
