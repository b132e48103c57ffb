use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use law_firm::{
    adapters::{
        inbound::{FormSession, SessionError},
        outbound::InMemoryRecords,
    },
    domain::{
        models::{Doctype, Form, FormContext},
        services::{ClientForm, LegalCaseForm, TimeEntryForm},
    },
    FormHandlers,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// A recorded sequence of host events for one form.
#[derive(Deserialize, Debug)]
pub struct Scenario {
    pub doctype: Doctype,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
    /// Starting document. Omitted fields take their defaults.
    #[serde(default)]
    pub doc: Option<Value>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_is_new() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Trigger(String),
    Set { field: String, value: Value },
}

/// A step that validation refused.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub step: usize,
    pub message: String,
}

#[derive(Serialize)]
struct Outcome<D> {
    doctype: Doctype,
    #[serde(flatten)]
    form: Form<D>,
    rejected: Vec<Rejection>,
}

impl Scenario {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }
}

/// Replays a scenario against the matching form and returns the final form
/// state as JSON.
pub async fn run(
    scenario: Scenario,
    records: Arc<InMemoryRecords>,
    ctx: FormContext,
) -> anyhow::Result<Value> {
    match scenario.doctype {
        Doctype::Client => replay(ClientForm, scenario, records, ctx).await,
        Doctype::LegalCase => replay(LegalCaseForm, scenario, records, ctx).await,
        Doctype::TimeEntry => replay(TimeEntryForm, scenario, records, ctx).await,
        other => anyhow::bail!("{} has no form handlers", other),
    }
}

async fn replay<H>(
    handlers: H,
    scenario: Scenario,
    records: Arc<InMemoryRecords>,
    ctx: FormContext,
) -> anyhow::Result<Value>
where
    H: FormHandlers,
    H::Doc: Serialize + DeserializeOwned + Default,
{
    let doc = match scenario.doc {
        Some(doc) => serde_json::from_value(doc).context("Invalid starting document")?,
        None => H::Doc::default(),
    };
    let form = if scenario.is_new {
        Form::new(doc)
    } else {
        Form::existing(doc)
    };

    tracing::info!(doctype = %H::DOCTYPE, steps = scenario.steps.len(), "replaying scenario");
    let mut session = FormSession::open(handlers, records, ctx, form).await;
    let mut rejected = Vec::new();

    for (index, step) in scenario.steps.into_iter().enumerate() {
        let step_number = index + 1;
        let result = match &step {
            Step::Trigger(event) => session.trigger(event).await,
            Step::Set { field, value } => session.set_value(field, value.clone()).await,
        };

        match result {
            Ok(()) => {}
            Err(SessionError::Validation(e)) => {
                tracing::info!(step = step_number, "validation failed: {}", e);
                rejected.push(Rejection {
                    step: step_number,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Step {} ({:?}) failed", step_number, step))
            }
        }
    }

    let outcome = Outcome {
        doctype: H::DOCTYPE,
        form: session.into_form(),
        rejected,
    };
    serde_json::to_value(outcome).context("Failed to serialize outcome")
}
