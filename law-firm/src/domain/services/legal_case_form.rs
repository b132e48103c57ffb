use serde_json::{Map, Value};

use crate::domain::{
    models::{
        CasePriority, CaseStatus, Doctype, Form, FormAction, FormContext, LegalCase,
        LegalCaseTrigger, LookupResult, PendingLookup, BILLING_AMOUNT_FIELDS,
    },
    ports::inbound::FormHandlers,
    ValidationError,
};

/// Form behavior for Legal Case records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalCaseForm;

impl LegalCaseForm {
    fn apply_status(&self, form: &mut Form<LegalCase>, ctx: &FormContext) {
        match form.doc.status {
            Some(status) if status.is_terminal() => {
                if form.doc.date_closed.is_none() {
                    form.doc.date_closed = Some(ctx.today);
                }
            }
            _ => form.doc.date_closed = None,
        }
    }

    fn apply_billing_method(&self, form: &mut Form<LegalCase>) {
        form.ui.toggle_display_all(&BILLING_AMOUNT_FIELDS, false);
        if let Some(method) = form.doc.billing_method {
            form.ui.toggle_display(method.amount_field(), true);
        }
    }

    fn request_billing_rate(&self, form: &Form<LegalCase>) -> Option<PendingLookup> {
        form.doc
            .client
            .clone()
            .map(|client| PendingLookup::ClientBillingRate { client })
    }

    fn case_label(case: &LegalCase) -> String {
        case.name
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "draft".to_string())
    }

    fn case_prefill(case: &LegalCase, name: &str) -> Map<String, Value> {
        let mut prefill = Map::new();
        prefill.insert("legal_case".to_string(), Value::from(name));
        if let Some(client) = &case.client {
            prefill.insert("client".to_string(), Value::from(client.as_str()));
        }
        prefill
    }
}

impl FormHandlers for LegalCaseForm {
    type Doc = LegalCase;
    type Trigger = LegalCaseTrigger;

    const DOCTYPE: Doctype = Doctype::LegalCase;

    fn on_load(&self, form: &mut Form<LegalCase>, ctx: &FormContext) {
        if form.is_new {
            form.doc.date_opened = Some(ctx.today);
            form.doc.status = Some(CaseStatus::Open);
            form.doc.priority = Some(CasePriority::Medium);
        }
    }

    fn refresh(&self, form: &mut Form<LegalCase>, _ctx: &FormContext) {
        form.clear_actions();
        self.apply_billing_method(form);

        if form.is_new {
            return;
        }
        let Some(name) = form.doc.name.clone() else {
            return;
        };

        let log_time = Self::case_prefill(&form.doc, name.as_str());
        let mut invoice = log_time.clone();
        if let Some(method) = form.doc.billing_method {
            invoice.insert("billing_method".to_string(), Value::from(method.to_string()));
        }

        form.add_action(FormAction::NewRecord {
            label: "Log Time".to_string(),
            doctype: Doctype::TimeEntry,
            prefill: log_time,
        });
        form.add_action(FormAction::NewRecord {
            label: "Create Invoice".to_string(),
            doctype: Doctype::LegalInvoice,
            prefill: invoice,
        });
    }

    fn trigger(
        &self,
        form: &mut Form<LegalCase>,
        trigger: LegalCaseTrigger,
        ctx: &FormContext,
    ) -> Option<PendingLookup> {
        match trigger {
            LegalCaseTrigger::Status => {
                self.apply_status(form, ctx);
                None
            }
            LegalCaseTrigger::BillingMethod => {
                self.apply_billing_method(form);
                None
            }
            LegalCaseTrigger::Client => self.request_billing_rate(form),
        }
    }

    fn lookup_resolved(
        &self,
        form: &mut Form<LegalCase>,
        lookup: &PendingLookup,
        result: LookupResult,
    ) {
        let (PendingLookup::ClientBillingRate { client }, LookupResult::BillingRate(rate)) =
            (lookup, result)
        else {
            return;
        };

        if form.doc.client.as_ref() != Some(client) {
            tracing::debug!(%client, "discarding billing rate for a client no longer selected");
            return;
        }

        match rate.filter(|rate| !rate.is_zero()) {
            Some(rate) => {
                tracing::debug!(%client, %rate, "applying client billing rate");
                form.doc.hourly_rate = Some(rate);
            }
            None => tracing::debug!(%client, "client has no billing rate"),
        }
    }

    fn validate(&self, form: &Form<LegalCase>, ctx: &FormContext) -> Result<(), ValidationError> {
        let case = &form.doc;

        if let Some(opened) = case.date_opened {
            if case.date_closed.is_some_and(|closed| closed < opened) {
                return Err(ValidationError::ClosedBeforeOpened);
            }
            if case.expected_close_date.is_some_and(|expected| expected < opened) {
                return Err(ValidationError::ExpectedCloseBeforeOpened);
            }
        }

        let active = !case.status.is_some_and(|status| status.is_terminal());
        if active
            && case
                .statute_of_limitations
                .is_some_and(|deadline| deadline < ctx.today)
        {
            return Err(ValidationError::StatuteOfLimitationsPassed);
        }

        if let Some(method) = case.billing_method {
            if case.billing_amount(method).map_or(true, |amount| amount.is_zero()) {
                return Err(ValidationError::MissingBillingAmount {
                    field: method.amount_label(),
                    method: method.into(),
                });
            }
        }

        Ok(())
    }

    fn on_submit(&self, form: &mut Form<LegalCase>, _ctx: &FormContext) {
        let message = format!(
            "Legal Case {} has been submitted successfully.",
            Self::case_label(&form.doc)
        );
        form.info("Submitted", message);
    }

    fn on_cancel(&self, form: &mut Form<LegalCase>, ctx: &FormContext) {
        if form.doc.status == Some(CaseStatus::Closed) {
            return;
        }
        form.doc.status = Some(CaseStatus::Cancelled);
        form.doc.date_closed = Some(ctx.today);
        let message = format!("Legal Case {} has been cancelled.", Self::case_label(&form.doc));
        form.info("Cancelled", message);
    }
}
