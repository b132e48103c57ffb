use std::fmt::Debug;
use std::str::FromStr;

use crate::domain::{
    models::{Doctype, Form, FormContext, LookupResult, PendingLookup},
    ValidationError,
};

/// Inbound port for one record type's form behavior.
///
/// Each method is a host lifecycle hook or named trigger. Hooks run to
/// completion on the form they are given; a trigger that needs a related
/// record returns a [`PendingLookup`] instead of waiting for it, and the
/// answer comes back through [`FormHandlers::lookup_resolved`].
pub trait FormHandlers: Send + Sync + 'static {
    type Doc;
    type Trigger: FromStr + Copy + Debug + Into<&'static str>;

    const DOCTYPE: Doctype;

    /// The form was opened.
    fn on_load(&self, form: &mut Form<Self::Doc>, ctx: &FormContext);

    /// The form was (re)rendered.
    fn refresh(&self, form: &mut Form<Self::Doc>, ctx: &FormContext);

    /// A field changed, or a calculation was requested by name.
    fn trigger(
        &self,
        form: &mut Form<Self::Doc>,
        trigger: Self::Trigger,
        ctx: &FormContext,
    ) -> Option<PendingLookup>;

    /// Applies the answer to a lookup this form requested earlier.
    fn lookup_resolved(
        &self,
        _form: &mut Form<Self::Doc>,
        _lookup: &PendingLookup,
        _result: LookupResult,
    ) {
    }

    /// Pre-save checks. The first failure blocks the save.
    fn validate(&self, form: &Form<Self::Doc>, ctx: &FormContext) -> Result<(), ValidationError>;

    fn on_submit(&self, _form: &mut Form<Self::Doc>, _ctx: &FormContext) {}

    fn on_cancel(&self, _form: &mut Form<Self::Doc>, _ctx: &FormContext) {}
}
