use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    models::{CaseId, ClientId, Doctype},
    ports::outbound::RecordLookup,
    LookupError,
};

/// Record store backed by fixed maps. A record that was never added is
/// reported as [`LookupError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    client_rates: HashMap<ClientId, Option<Decimal>>,
    case_clients: HashMap<CaseId, Option<ClientId>>,
    offline: bool,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every lookup fails as unavailable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_client_rate(mut self, client: impl Into<ClientId>, rate: Option<Decimal>) -> Self {
        self.client_rates.insert(client.into(), rate);
        self
    }

    pub fn with_case_client(
        mut self,
        legal_case: impl Into<CaseId>,
        client: Option<ClientId>,
    ) -> Self {
        self.case_clients.insert(legal_case.into(), client);
        self
    }

    fn ensure_online(&self) -> Result<(), LookupError> {
        if self.offline {
            return Err(LookupError::unavailable("record store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordLookup for InMemoryRecords {
    async fn client_billing_rate(
        &self,
        client: &ClientId,
    ) -> Result<Option<Decimal>, LookupError> {
        self.ensure_online()?;
        self.client_rates
            .get(client)
            .copied()
            .ok_or_else(|| LookupError::NotFound {
                doctype: Doctype::Client.into(),
                name: client.to_string(),
            })
    }

    async fn case_client(&self, legal_case: &CaseId) -> Result<Option<ClientId>, LookupError> {
        self.ensure_online()?;
        self.case_clients
            .get(legal_case)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                doctype: Doctype::LegalCase.into(),
                name: legal_case.to_string(),
            })
    }
}
