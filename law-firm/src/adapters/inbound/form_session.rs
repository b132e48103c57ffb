use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    models::{Form, FormContext, PendingLookup},
    ports::{inbound::FormHandlers, outbound::RecordLookup},
    ValidationError,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("invalid value for '{field}': {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read form document: {0}")]
    Document(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One open form, driven by host event names.
///
/// Lifecycle events are `onload`, `refresh`, `validate`, `on_submit` and
/// `on_cancel`; any other name must parse as one of the handler's triggers.
pub struct FormSession<H: FormHandlers, L> {
    handlers: H,
    records: Arc<L>,
    ctx: FormContext,
    form: Form<H::Doc>,
}

impl<H, L> FormSession<H, L>
where
    H: FormHandlers,
    L: RecordLookup,
{
    pub fn new(handlers: H, records: Arc<L>, ctx: FormContext, form: Form<H::Doc>) -> Self {
        Self {
            handlers,
            records,
            ctx,
            form,
        }
    }

    /// Opens the form: runs `onload` then `refresh`.
    pub async fn open(
        handlers: H,
        records: Arc<L>,
        ctx: FormContext,
        form: Form<H::Doc>,
    ) -> Self {
        let mut session = Self::new(handlers, records, ctx, form);
        session.handlers.on_load(&mut session.form, &session.ctx);
        session.handlers.refresh(&mut session.form, &session.ctx);
        session
    }

    pub fn form(&self) -> &Form<H::Doc> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<H::Doc> {
        &mut self.form
    }

    pub fn into_form(self) -> Form<H::Doc> {
        self.form
    }

    #[instrument(skip(self), fields(doctype = %H::DOCTYPE))]
    pub async fn trigger(&mut self, event: &str) -> Result<(), SessionError> {
        match event {
            "onload" => self.handlers.on_load(&mut self.form, &self.ctx),
            "refresh" => self.handlers.refresh(&mut self.form, &self.ctx),
            "validate" => self.handlers.validate(&self.form, &self.ctx)?,
            "on_submit" => {
                self.handlers.validate(&self.form, &self.ctx)?;
                self.handlers.on_submit(&mut self.form, &self.ctx);
                self.handlers.refresh(&mut self.form, &self.ctx);
            }
            "on_cancel" => {
                self.handlers.on_cancel(&mut self.form, &self.ctx);
                self.handlers.refresh(&mut self.form, &self.ctx);
            }
            other => {
                let trigger = other
                    .parse::<H::Trigger>()
                    .map_err(|_| SessionError::UnknownEvent(other.to_string()))?;
                if let Some(lookup) = self.start(trigger) {
                    self.complete(lookup).await;
                }
            }
        }
        Ok(())
    }

    /// Runs a trigger without resolving the lookup it asks for. Hand the
    /// lookup to [`FormSession::complete`] whenever the answer is wanted;
    /// other events may run in between.
    pub fn start(&mut self, trigger: H::Trigger) -> Option<PendingLookup> {
        let name: &'static str = trigger.into();
        tracing::debug!(trigger = name, "running trigger");
        self.handlers.trigger(&mut self.form, trigger, &self.ctx)
    }

    /// Resolves a lookup and applies the answer. A failed lookup leaves the
    /// form untouched.
    pub async fn complete(&mut self, lookup: PendingLookup) {
        match self.records.resolve(&lookup).await {
            Ok(result) => self
                .handlers
                .lookup_resolved(&mut self.form, &lookup, result),
            Err(e) => tracing::warn!(?lookup, "lookup failed: {}", e),
        }
    }
}

impl<H, L> FormSession<H, L>
where
    H: FormHandlers,
    H::Doc: Serialize + DeserializeOwned,
    L: RecordLookup,
{
    /// Sets a document field by its host name, then runs the field's change
    /// trigger if it has one.
    #[instrument(skip(self, value), fields(doctype = %H::DOCTYPE))]
    pub async fn set_value(&mut self, field: &str, value: Value) -> Result<(), SessionError> {
        let mut doc = serde_json::to_value(&self.form.doc).map_err(SessionError::Document)?;
        let fields = doc
            .as_object_mut()
            .ok_or_else(|| SessionError::UnknownField(field.to_string()))?;
        match fields.get_mut(field) {
            Some(slot) => *slot = value,
            None => return Err(SessionError::UnknownField(field.to_string())),
        }

        self.form.doc = serde_json::from_value(doc).map_err(|source| SessionError::InvalidValue {
            field: field.to_string(),
            source,
        })?;

        if let Ok(trigger) = field.parse::<H::Trigger>() {
            if let Some(lookup) = self.start(trigger) {
                self.complete(lookup).await;
            }
        }
        Ok(())
    }
}
