use rust_decimal::Decimal;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, PrimitiveDateTime, Time};

use crate::domain::{
    models::{
        BillingStatus, DocStatus, Doctype, Form, FormAction, FormContext, LookupResult,
        PendingLookup, TimeEntry, TimeEntryTrigger, BILLABLE_FIELDS, BILLABLE_HOURS,
        BILLING_RATE, INVOICE_FIELDS,
    },
    ports::inbound::FormHandlers,
    rounding::round_2,
    DurationError, ValidationError,
};

const CLOCK_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[hour padding:none]:[minute]"),
    format_description!("[hour padding:none]:[minute]:[second]"),
    format_description!("[hour padding:none]:[minute]:[second].[subsecond]"),
];

const SECONDS_PER_HOUR: i64 = 3600;
const MIN_DESCRIPTION_CHARS: usize = 5;

fn parse_clock(value: &str) -> Result<Time, DurationError> {
    let value = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| Time::parse(value, format).ok())
        .ok_or_else(|| DurationError::InvalidTime(value.to_string()))
}

/// Hours between two clock times on `date`, to 2 decimal places.
///
/// An end time earlier than the start time is taken to fall on the next
/// day, so a 22:00 to 02:00 shift is four hours.
pub fn duration_hours(date: Date, from_time: &str, to_time: &str) -> Result<Decimal, DurationError> {
    let start = PrimitiveDateTime::new(date, parse_clock(from_time)?);
    let mut end = PrimitiveDateTime::new(date, parse_clock(to_time)?);
    if end < start {
        end = end
            .checked_add(Duration::days(1))
            .ok_or_else(|| DurationError::OutOfRange(date.to_string()))?;
    }

    let seconds = (end - start).whole_seconds();
    Ok(round_2(
        Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR),
    ))
}

/// Form behavior for Time Entry records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeEntryForm;

impl TimeEntryForm {
    fn show_billable_fields(&self, form: &mut Form<TimeEntry>) {
        let billable = form.doc.billable;
        form.ui.toggle_display_all(&BILLABLE_FIELDS, billable);
        form.ui.toggle_reqd(BILLING_RATE, billable);
        form.ui.toggle_reqd(BILLABLE_HOURS, billable);
    }

    fn apply_billable(&self, form: &mut Form<TimeEntry>) {
        self.show_billable_fields(form);

        let entry = &mut form.doc;
        if entry.billable {
            if entry.billable_hours.map_or(true, |hours| hours.is_zero()) {
                entry.billable_hours = Some(entry.hours);
            }
            self.calculate_billable_amount(form);
        } else {
            entry.billing_rate = Some(Decimal::ZERO);
            entry.billable_hours = Some(Decimal::ZERO);
            entry.billable_amount = Decimal::ZERO;
            form.clear_user_edited(BILLABLE_HOURS);
        }
    }

    /// Derives `hours` from the activity date and the two clock times.
    pub fn calculate_hours(&self, form: &mut Form<TimeEntry>) {
        let entry = &form.doc;
        let inputs = match (entry.activity_date, &entry.from_time, &entry.to_time) {
            (Some(date), Some(from), Some(to)) if entry.has_times() => {
                Some((date, from.clone(), to.clone()))
            }
            _ => None,
        };
        let Some((date, from, to)) = inputs else {
            self.reset_derived(form);
            return;
        };

        match duration_hours(date, &from, &to) {
            Ok(hours) => {
                form.doc.hours = hours;
                if form.doc.billable {
                    if !form.is_user_edited(BILLABLE_HOURS) {
                        form.doc.billable_hours = Some(hours);
                    }
                    self.calculate_billable_amount(form);
                }
            }
            Err(e) => {
                tracing::error!("Error calculating hours: {}", e);
                form.error(
                    "Error",
                    "Please enter valid times for From Time and To Time.",
                );
                self.reset_derived(form);
            }
        }
    }

    /// Recomputes `billable_amount` from the rate and billable hours.
    pub fn calculate_billable_amount(&self, form: &mut Form<TimeEntry>) {
        let entry = &mut form.doc;
        if !entry.billable {
            entry.billable_amount = Decimal::ZERO;
            return;
        }

        let rate = entry.billing_rate.filter(|rate| !rate.is_zero());
        let hours = entry.billable_hours.filter(|hours| *hours >= Decimal::ZERO);
        if let (Some(rate), Some(hours)) = (rate, hours) {
            entry.billable_amount = round_2(rate * hours);
        }
    }

    fn reset_derived(&self, form: &mut Form<TimeEntry>) {
        form.doc.reset_derived();
        form.clear_user_edited(BILLABLE_HOURS);
    }

    fn apply_legal_case(&self, form: &mut Form<TimeEntry>) -> Option<PendingLookup> {
        match form.doc.legal_case.clone() {
            Some(legal_case) => Some(PendingLookup::CaseClient { legal_case }),
            None => {
                form.doc.client = None;
                None
            }
        }
    }

    fn entry_label(entry: &TimeEntry) -> String {
        entry
            .name
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "draft".to_string())
    }
}

impl FormHandlers for TimeEntryForm {
    type Doc = TimeEntry;
    type Trigger = TimeEntryTrigger;

    const DOCTYPE: Doctype = Doctype::TimeEntry;

    fn on_load(&self, form: &mut Form<TimeEntry>, ctx: &FormContext) {
        if !form.is_new {
            return;
        }
        form.doc.activity_date = Some(ctx.today);
        if form.doc.employee.is_none() {
            form.doc.employee = Some(ctx.user.clone());
        }
        if form.doc.billing_status.is_none() {
            form.doc.billing_status = Some(BillingStatus::Draft);
        }
    }

    fn refresh(&self, form: &mut Form<TimeEntry>, _ctx: &FormContext) {
        form.clear_actions();
        self.show_billable_fields(form);

        if !form.is_new {
            if let Some(legal_case) = &form.doc.legal_case {
                let action = FormAction::OpenRecord {
                    label: "View Legal Case".to_string(),
                    doctype: Doctype::LegalCase,
                    name: legal_case.to_string(),
                };
                form.add_action(action);
            }
        }

        let invoiced = form.doc.billing_status == Some(BillingStatus::Invoiced);
        for field in INVOICE_FIELDS {
            form.ui.set_field_read_only(field, !invoiced);
        }

        form.ui
            .set_read_only(form.doc.docstatus == DocStatus::Submitted);
    }

    fn trigger(
        &self,
        form: &mut Form<TimeEntry>,
        trigger: TimeEntryTrigger,
        _ctx: &FormContext,
    ) -> Option<PendingLookup> {
        match trigger {
            TimeEntryTrigger::LegalCase => return self.apply_legal_case(form),
            TimeEntryTrigger::FromTime
            | TimeEntryTrigger::ToTime
            | TimeEntryTrigger::CalculateHours => self.calculate_hours(form),
            TimeEntryTrigger::Billable => self.apply_billable(form),
            TimeEntryTrigger::BillableHours => {
                form.mark_user_edited(BILLABLE_HOURS);
                self.calculate_billable_amount(form);
            }
            TimeEntryTrigger::BillingRate | TimeEntryTrigger::CalculateBillableAmount => {
                self.calculate_billable_amount(form)
            }
        }
        None
    }

    fn lookup_resolved(
        &self,
        form: &mut Form<TimeEntry>,
        lookup: &PendingLookup,
        result: LookupResult,
    ) {
        let (PendingLookup::CaseClient { legal_case }, LookupResult::CaseClient(client)) =
            (lookup, result)
        else {
            return;
        };

        if form.doc.legal_case.as_ref() != Some(legal_case) {
            tracing::debug!(%legal_case, "discarding client of a case no longer selected");
            return;
        }

        match client {
            Some(client) => {
                tracing::debug!(%legal_case, %client, "applying client from legal case");
                form.doc.client = Some(client);
            }
            None => {
                form.doc.client = None;
                form.info("Info", "Client not found for the selected Legal Case.");
            }
        }
    }

    fn validate(&self, form: &Form<TimeEntry>, _ctx: &FormContext) -> Result<(), ValidationError> {
        let entry = &form.doc;

        let description_chars = entry.description.as_deref().map_or(0, |d| d.chars().count());
        if description_chars < MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort);
        }

        if entry.has_times() && entry.hours <= Decimal::ZERO {
            return Err(ValidationError::ZeroDuration);
        }

        let activity_type = entry.activity_type.as_deref().map(str::trim);
        if activity_type.map_or(true, str::is_empty) {
            return Err(ValidationError::MissingActivityType);
        }

        if entry.billable {
            if !entry.billing_rate.is_some_and(|rate| rate > Decimal::ZERO) {
                return Err(ValidationError::NonPositiveBillingRate);
            }
            if !entry.billable_hours.is_some_and(|hours| hours > Decimal::ZERO) {
                return Err(ValidationError::NonPositiveBillableHours);
            }
            if entry.billable_amount <= Decimal::ZERO {
                return Err(ValidationError::BillableAmountNotCalculated);
            }
        }

        Ok(())
    }

    fn on_submit(&self, form: &mut Form<TimeEntry>, _ctx: &FormContext) {
        form.doc.docstatus = DocStatus::Submitted;
        form.doc.billing_status = Some(BillingStatus::Approved);
        let message = format!("Time Entry {} has been approved.", Self::entry_label(&form.doc));
        form.info("Approved", message);
    }

    fn on_cancel(&self, form: &mut Form<TimeEntry>, _ctx: &FormContext) {
        form.doc.docstatus = DocStatus::Cancelled;
        form.doc.billing_status = Some(BillingStatus::Cancelled);
        let message = format!("Time Entry {} has been cancelled.", Self::entry_label(&form.doc));
        form.info("Cancelled", message);
    }
}
