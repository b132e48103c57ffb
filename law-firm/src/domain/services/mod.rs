mod client_form;
mod legal_case_form;
mod time_entry_form;

pub use client_form::*;
pub use legal_case_form::*;
pub use time_entry_form::*;
