use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::{
    models::{
        Address, Client, ClientStatus, ClientTrigger, ClientType, Doctype, Form, FormAction,
        FormContext, PendingLookup, LEGAL_INFO_FIELDS, LEGAL_INFO_SECTION,
    },
    ports::inbound::FormHandlers,
    Email, ValidationError,
};

static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").expect("SSN pattern is valid"));

const DEFAULT_BILLING_CURRENCY: &str = "USD";
const MIN_PHONE_DIGITS: usize = 10;

/// Form behavior for Client records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientForm;

impl ClientForm {
    fn apply_client_type(&self, form: &mut Form<Client>) {
        let corporate = form
            .doc
            .client_type
            .as_ref()
            .is_some_and(ClientType::needs_legal_info);
        for field in LEGAL_INFO_FIELDS {
            form.ui.toggle_reqd(field, corporate);
        }
        form.ui.set_section_hidden(LEGAL_INFO_SECTION, !corporate);
    }

    fn apply_billing_address_same(&self, form: &mut Form<Client>) {
        let address = if form.doc.billing_address_same {
            form.doc.primary_address()
        } else {
            Address::default()
        };
        form.doc.set_billing_address(address);
    }

    fn list_action(label: &str, doctype: Doctype, client: &str) -> FormAction {
        FormAction::ViewList {
            label: label.to_string(),
            doctype,
            filters: BTreeMap::from([("client".to_string(), client.to_string())]),
        }
    }
}

fn has_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn is_valid_phone(number: &str) -> bool {
    number.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

fn is_percentage(value: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&value)
}

impl FormHandlers for ClientForm {
    type Doc = Client;
    type Trigger = ClientTrigger;

    const DOCTYPE: Doctype = Doctype::Client;

    fn on_load(&self, form: &mut Form<Client>, _ctx: &FormContext) {
        if form.is_new {
            form.doc.status = Some(ClientStatus::Active);
            if form.doc.billing_currency.is_none() {
                form.doc.billing_currency = Some(DEFAULT_BILLING_CURRENCY.to_string());
            }
        }
    }

    fn refresh(&self, form: &mut Form<Client>, ctx: &FormContext) {
        form.clear_actions();

        if form.is_new {
            if form.doc.date_joined.is_none() {
                form.doc.date_joined = Some(ctx.today);
            }
            return;
        }

        if let Some(name) = form.doc.name.clone() {
            form.add_action(Self::list_action("View Cases", Doctype::LegalCase, name.as_str()));
            form.add_action(Self::list_action(
                "View Invoices",
                Doctype::LegalInvoice,
                name.as_str(),
            ));
        }
    }

    fn trigger(
        &self,
        form: &mut Form<Client>,
        trigger: ClientTrigger,
        _ctx: &FormContext,
    ) -> Option<PendingLookup> {
        match trigger {
            ClientTrigger::ClientType => self.apply_client_type(form),
            ClientTrigger::BillingAddressSame => self.apply_billing_address_same(form),
        }
        None
    }

    fn validate(&self, form: &Form<Client>, ctx: &FormContext) -> Result<(), ValidationError> {
        let client = &form.doc;

        if let Some(email) = has_text(&client.email) {
            Email::try_from(email).map_err(|e| {
                tracing::debug!("rejected client email: {}", e);
                ValidationError::InvalidEmail
            })?;
        }

        if client.client_type == Some(ClientType::Corporation)
            && client.date_of_incorporation.is_none()
        {
            return Err(ValidationError::MissingIncorporationDate);
        }

        if has_text(&client.mobile).is_some_and(|m| !is_valid_phone(m)) {
            return Err(ValidationError::InvalidMobile);
        }
        if has_text(&client.phone).is_some_and(|p| !is_valid_phone(p)) {
            return Err(ValidationError::InvalidPhone);
        }

        if client.date_of_birth.is_some_and(|dob| dob > ctx.today) {
            return Err(ValidationError::BirthDateInFuture);
        }

        if has_text(&client.ssn).is_some_and(|ssn| !SSN.is_match(ssn)) {
            return Err(ValidationError::InvalidSsn);
        }

        if client.credit_limit.is_some_and(|limit| limit < Decimal::ZERO) {
            return Err(ValidationError::NegativeCreditLimit);
        }
        if client.tax_rate.is_some_and(|rate| !is_percentage(rate)) {
            return Err(ValidationError::TaxRateOutOfRange);
        }
        if client
            .discount_percentage
            .is_some_and(|discount| !is_percentage(discount))
        {
            return Err(ValidationError::DiscountOutOfRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use super::*;

    fn ctx() -> FormContext {
        FormContext::new(date!(2024 - 03 - 15), "paralegal@firm.com")
    }

    fn corporate_client(client_type: ClientType) -> Form<Client> {
        Form::existing(Client {
            client_type: Some(client_type),
            date_of_incorporation: Some(date!(2010 - 06 - 01)),
            ..Default::default()
        })
    }

    fn with_primary_address() -> Form<Client> {
        Form::new(Client {
            address_line_1: Some("1 Main St".into()),
            address_line_2: Some("Suite 400".into()),
            city: Some("Boston".into()),
            state: Some("MA".into()),
            postal_code: Some("02110".into()),
            country: Some("United States".into()),
            ..Default::default()
        })
    }

    #[test]
    fn new_client_defaults_to_active() {
        let mut form = Form::new(Client::default());
        ClientForm.on_load(&mut form, &ctx());
        assert_eq!(form.doc.status, Some(ClientStatus::Active));
        assert_eq!(form.doc.billing_currency.as_deref(), Some("USD"));
    }

    #[test]
    fn existing_client_keeps_its_status() {
        let mut form = Form::existing(Client {
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        });
        ClientForm.on_load(&mut form, &ctx());
        assert_eq!(form.doc.status, Some(ClientStatus::Inactive));
        assert_eq!(form.doc.billing_currency, None);
    }

    #[test]
    fn refresh_on_new_client_sets_date_joined() {
        let mut form = Form::new(Client::default());
        ClientForm.refresh(&mut form, &ctx());
        assert_eq!(form.doc.date_joined, Some(date!(2024 - 03 - 15)));
        assert!(form.actions().is_empty());
    }

    #[test]
    fn refresh_on_saved_client_adds_filtered_navigation() {
        let mut form = Form::existing(Client {
            name: Some("CLI-0042".into()),
            ..Default::default()
        });
        ClientForm.refresh(&mut form, &ctx());
        ClientForm.refresh(&mut form, &ctx());

        assert_eq!(form.actions().len(), 2);
        match form.action("View Invoices") {
            Some(FormAction::ViewList {
                doctype, filters, ..
            }) => {
                assert_eq!(*doctype, Doctype::LegalInvoice);
                assert_eq!(filters.get("client").map(String::as_str), Some("CLI-0042"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(form.action("View Cases").is_some());
        assert_eq!(form.doc.date_joined, None);
    }

    #[test]
    fn corporate_types_require_legal_info() {
        for client_type in [ClientType::Corporation, ClientType::Partnership] {
            let mut form = corporate_client(client_type);
            ClientForm.trigger(&mut form, ClientTrigger::ClientType, &ctx());
            for field in LEGAL_INFO_FIELDS {
                assert!(form.ui.is_required(field), "{} for {}", field, client_type);
            }
            assert!(form.ui.is_section_visible(LEGAL_INFO_SECTION));
        }
    }

    #[test]
    fn other_types_drop_legal_info() {
        let mut form = corporate_client(ClientType::Corporation);
        ClientForm.trigger(&mut form, ClientTrigger::ClientType, &ctx());

        form.doc.client_type = Some(ClientType::Individual);
        ClientForm.trigger(&mut form, ClientTrigger::ClientType, &ctx());
        for field in LEGAL_INFO_FIELDS {
            assert!(!form.ui.is_required(field));
        }
        assert!(!form.ui.is_section_visible(LEGAL_INFO_SECTION));

        form.doc.client_type = None;
        ClientForm.trigger(&mut form, ClientTrigger::ClientType, &ctx());
        assert!(!form.ui.is_section_visible(LEGAL_INFO_SECTION));
    }

    #[test]
    fn billing_address_same_copies_primary_address() {
        let mut form = with_primary_address();
        form.doc.billing_address_same = true;
        ClientForm.trigger(&mut form, ClientTrigger::BillingAddressSame, &ctx());

        assert_eq!(form.doc.billing_address_line_1.as_deref(), Some("1 Main St"));
        assert_eq!(form.doc.billing_address_line_2.as_deref(), Some("Suite 400"));
        assert_eq!(form.doc.billing_postal_code.as_deref(), Some("02110"));
        assert_eq!(form.doc.billing_country.as_deref(), Some("United States"));
    }

    #[test]
    fn unchecking_billing_address_same_clears_billing_fields() {
        let mut form = with_primary_address();
        form.doc.billing_address_same = true;
        ClientForm.trigger(&mut form, ClientTrigger::BillingAddressSame, &ctx());

        form.doc.billing_address_same = false;
        ClientForm.trigger(&mut form, ClientTrigger::BillingAddressSame, &ctx());
        assert!(form.doc.billing_address().is_empty());
        assert_eq!(form.doc.city.as_deref(), Some("Boston"));
    }

    #[test]
    fn toggling_billing_address_twice_restores_the_copy() {
        let mut form = with_primary_address();
        let mut copies = Vec::new();
        for same in [true, false, true] {
            form.doc.billing_address_same = same;
            ClientForm.trigger(&mut form, ClientTrigger::BillingAddressSame, &ctx());
            copies.push(form.doc.billing_address());
        }
        assert_eq!(copies[0], copies[2]);
        assert_eq!(copies[2], form.doc.primary_address());
    }

    #[test]
    fn invalid_email_blocks_save() {
        let form = Form::new(Client {
            email: Some("not-an-email".into()),
            ..Default::default()
        });
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn empty_email_is_allowed() {
        let form = Form::new(Client {
            email: Some(String::new()),
            ..Default::default()
        });
        assert!(ClientForm.validate(&form, &ctx()).is_ok());
    }

    #[test]
    fn corporation_needs_incorporation_date() {
        let mut form = corporate_client(ClientType::Corporation);
        form.doc.date_of_incorporation = None;
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::MissingIncorporationDate)
        );

        let mut partnership = corporate_client(ClientType::Partnership);
        partnership.doc.date_of_incorporation = None;
        assert!(ClientForm.validate(&partnership, &ctx()).is_ok());
    }

    #[test]
    fn short_phone_numbers_are_rejected() {
        let mut form = Form::new(Client {
            mobile: Some("(555) 123-4567".into()),
            phone: Some("555-1234".into()),
            ..Default::default()
        });
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::InvalidPhone)
        );
        form.doc.mobile = Some("12345".into());
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::InvalidMobile)
        );
    }

    #[test]
    fn birth_date_cannot_be_in_the_future() {
        let mut form = Form::new(Client {
            date_of_birth: Some(date!(2024 - 03 - 16)),
            ..Default::default()
        });
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::BirthDateInFuture)
        );
        form.doc.date_of_birth = Some(date!(2024 - 03 - 15));
        assert!(ClientForm.validate(&form, &ctx()).is_ok());
    }

    #[test]
    fn ssn_must_match_format() {
        let mut form = Form::new(Client {
            ssn: Some("123456789".into()),
            ..Default::default()
        });
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::InvalidSsn)
        );
        form.doc.ssn = Some("123-45-6789".into());
        assert!(ClientForm.validate(&form, &ctx()).is_ok());
    }

    #[test]
    fn billing_figures_must_be_in_range() {
        let mut form = Form::new(Client {
            credit_limit: Some(dec!(-1)),
            ..Default::default()
        });
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::NegativeCreditLimit)
        );

        form.doc.credit_limit = Some(dec!(0));
        form.doc.tax_rate = Some(dec!(100.01));
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::TaxRateOutOfRange)
        );

        form.doc.tax_rate = Some(dec!(100));
        form.doc.discount_percentage = Some(dec!(-5));
        assert_eq!(
            ClientForm.validate(&form, &ctx()),
            Err(ValidationError::DiscountOutOfRange)
        );

        form.doc.discount_percentage = Some(dec!(12.5));
        assert!(ClientForm.validate(&form, &ctx()).is_ok());
    }
}
