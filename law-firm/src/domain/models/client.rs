use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use time::Date;

use super::ClientId;

pub const LEGAL_INFO_SECTION: &str = "legal_info_section";

/// Fields that become mandatory for corporate client types.
pub const LEGAL_INFO_FIELDS: [&str; 3] = [
    "legal_entity_type",
    "business_registration",
    "date_of_incorporation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ClientType {
    Individual,
    Corporation,
    Partnership,
}

impl ClientType {
    /// Corporate clients must record their legal-entity details.
    pub fn needs_legal_info(&self) -> bool {
        matches!(self, ClientType::Corporation | ClientType::Partnership)
    }
}

/// Host events the client form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClientTrigger {
    ClientType,
    BillingAddressSame,
}

/// One of the two address blocks on the client form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line_1: Option<String>,
    pub line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: Option<ClientId>,
    pub client_name: Option<String>,
    pub status: Option<ClientStatus>,
    pub client_type: Option<ClientType>,
    pub date_joined: Option<Date>,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub date_of_birth: Option<Date>,
    pub ssn: Option<String>,

    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,

    pub billing_address_same: bool,
    pub billing_address_line_1: Option<String>,
    pub billing_address_line_2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,

    pub legal_entity_type: Option<String>,
    pub business_registration: Option<String>,
    pub date_of_incorporation: Option<Date>,

    pub billing_rate: Option<Decimal>,
    pub billing_currency: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
}

impl Client {
    pub fn primary_address(&self) -> Address {
        Address {
            line_1: self.address_line_1.clone(),
            line_2: self.address_line_2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }

    pub fn billing_address(&self) -> Address {
        Address {
            line_1: self.billing_address_line_1.clone(),
            line_2: self.billing_address_line_2.clone(),
            city: self.billing_city.clone(),
            state: self.billing_state.clone(),
            postal_code: self.billing_postal_code.clone(),
            country: self.billing_country.clone(),
        }
    }

    pub fn set_billing_address(&mut self, address: Address) {
        self.billing_address_line_1 = address.line_1;
        self.billing_address_line_2 = address.line_2;
        self.billing_city = address.city;
        self.billing_state = address.state;
        self.billing_postal_code = address.postal_code;
        self.billing_country = address.country;
    }

    /// The primary address on one line, as shown on letters and invoices.
    /// The country is left off for domestic clients.
    pub fn full_address(&self) -> Option<String> {
        let address = self.primary_address();
        let country = address
            .country
            .as_deref()
            .filter(|country| *country != "United States");
        let parts: Vec<&str> = [
            address.line_1.as_deref(),
            address.line_2.as_deref(),
            address.city.as_deref(),
            address.state.as_deref(),
            address.postal_code.as_deref(),
            country,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
