use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};
use time::Date;

use super::UserId;

/// Record types the forms link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum Doctype {
    Client,
    #[strum(serialize = "Legal Case")]
    #[serde(rename = "Legal Case")]
    LegalCase,
    #[strum(serialize = "Time Entry")]
    #[serde(rename = "Time Entry")]
    TimeEntry,
    #[strum(serialize = "Legal Invoice")]
    #[serde(rename = "Legal Invoice")]
    LegalInvoice,
}

/// Inputs the handlers would otherwise read from host globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext {
    pub today: Date,
    pub user: UserId,
}

impl FormContext {
    pub fn new(today: Date, user: impl Into<UserId>) -> Self {
        Self {
            today,
            user: user.into(),
        }
    }
}

/// Per-field display flags. Fields the handlers never touched are visible,
/// optional and editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldUi {
    pub hidden: bool,
    pub required: bool,
    pub read_only: bool,
}

/// Display state the handlers toggle on the rendered form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormUi {
    fields: BTreeMap<&'static str, FieldUi>,
    hidden_sections: BTreeSet<&'static str>,
    read_only: bool,
}

impl FormUi {
    pub fn toggle_display(&mut self, field: &'static str, visible: bool) {
        self.fields.entry(field).or_default().hidden = !visible;
    }

    pub fn toggle_display_all(&mut self, fields: &[&'static str], visible: bool) {
        for field in fields {
            self.toggle_display(field, visible);
        }
    }

    pub fn toggle_reqd(&mut self, field: &'static str, required: bool) {
        self.fields.entry(field).or_default().required = required;
    }

    pub fn set_field_read_only(&mut self, field: &'static str, read_only: bool) {
        self.fields.entry(field).or_default().read_only = read_only;
    }

    pub fn set_section_hidden(&mut self, section: &'static str, hidden: bool) {
        if hidden {
            self.hidden_sections.insert(section);
        } else {
            self.hidden_sections.remove(section);
        }
    }

    /// Locks or unlocks the whole form. Field-level read-only flags are kept.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn field(&self, field: &str) -> FieldUi {
        self.fields.get(field).copied().unwrap_or_default()
    }

    pub fn is_visible(&self, field: &str) -> bool {
        !self.field(field).hidden
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.field(field).required
    }

    /// True when the field is locked on its own or the whole form is.
    pub fn is_field_read_only(&self, field: &str) -> bool {
        self.read_only || self.field(field).read_only
    }

    pub fn is_section_visible(&self, section: &str) -> bool {
        !self.hidden_sections.contains(section)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// A toolbar button added on refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormAction {
    /// Navigate to a list of `doctype` filtered by field equality.
    ViewList {
        label: String,
        doctype: Doctype,
        filters: BTreeMap<String, String>,
    },
    /// Navigate to a single record.
    OpenRecord {
        label: String,
        doctype: Doctype,
        name: String,
    },
    /// Open a new-record form with fields prefilled.
    NewRecord {
        label: String,
        doctype: Doctype,
        prefill: Map<String, Value>,
    },
}

impl FormAction {
    pub fn label(&self) -> &str {
        match self {
            FormAction::ViewList { label, .. }
            | FormAction::OpenRecord { label, .. }
            | FormAction::NewRecord { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

/// The document being edited plus everything the handlers changed about its
/// presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form<D> {
    pub doc: D,
    pub is_new: bool,
    pub ui: FormUi,
    actions: Vec<FormAction>,
    notices: Vec<Notice>,
    #[serde(skip)]
    user_edited: BTreeSet<&'static str>,
}

impl<D> Form<D> {
    /// A record that has not been saved yet.
    pub fn new(doc: D) -> Self {
        Self::with_state(doc, true)
    }

    /// A record loaded from storage.
    pub fn existing(doc: D) -> Self {
        Self::with_state(doc, false)
    }

    fn with_state(doc: D, is_new: bool) -> Self {
        Self {
            doc,
            is_new,
            ui: FormUi::default(),
            actions: Vec::new(),
            notices: Vec::new(),
            user_edited: BTreeSet::new(),
        }
    }

    pub fn add_action(&mut self, action: FormAction) {
        self.actions.push(action);
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    pub fn actions(&self) -> &[FormAction] {
        &self.actions
    }

    pub fn action(&self, label: &str) -> Option<&FormAction> {
        self.actions.iter().find(|a| a.label() == label)
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_notice(NoticeLevel::Info, title.into(), message.into());
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_notice(NoticeLevel::Error, title.into(), message.into());
    }

    fn push_notice(&mut self, level: NoticeLevel, title: String, message: String) {
        self.notices.push(Notice {
            level,
            title,
            message,
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains queued notices once the host has shown them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Records that the user typed a value into `field` themselves.
    pub fn mark_user_edited(&mut self, field: &'static str) {
        self.user_edited.insert(field);
    }

    pub fn clear_user_edited(&mut self, field: &str) {
        self.user_edited.remove(field);
    }

    pub fn is_user_edited(&self, field: &str) -> bool {
        self.user_edited.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_fields_are_visible_and_optional() {
        let ui = FormUi::default();
        assert!(ui.is_visible("anything"));
        assert!(!ui.is_required("anything"));
        assert!(!ui.is_field_read_only("anything"));
        assert!(ui.is_section_visible("some_section"));
    }

    #[test]
    fn whole_form_lock_overrides_field_flags() {
        let mut ui = FormUi::default();
        ui.set_field_read_only("invoiced", false);
        ui.set_read_only(true);
        assert!(ui.is_field_read_only("invoiced"));
        assert!(ui.is_field_read_only("description"));

        ui.set_read_only(false);
        assert!(!ui.is_field_read_only("invoiced"));
    }

    #[test]
    fn section_visibility_toggles() {
        let mut ui = FormUi::default();
        ui.set_section_hidden("legal_info_section", true);
        assert!(!ui.is_section_visible("legal_info_section"));
        ui.set_section_hidden("legal_info_section", false);
        assert!(ui.is_section_visible("legal_info_section"));
    }

    #[test]
    fn take_notices_drains_the_queue() {
        let mut form = Form::new(());
        form.info("Info", "first");
        form.error("Error", "second");
        let notices = form.take_notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].level, NoticeLevel::Error);
        assert!(form.notices().is_empty());
    }

    #[test]
    fn doctype_uses_host_labels() {
        assert_eq!(Doctype::LegalCase.to_string(), "Legal Case");
        assert_eq!("Time Entry".parse::<Doctype>().unwrap(), Doctype::TimeEntry);
    }
}
