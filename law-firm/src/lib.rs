//! Form behavior for law-firm clients, legal cases and time entries.
//!
//! The handlers in [`domain::services`] are plain functions over a [`Form`]
//! and an explicit [`FormContext`]. Hosts drive them through
//! [`adapters::inbound::FormSession`], which maps named events onto handler
//! calls and resolves related-record lookups through a [`RecordLookup`].

pub mod adapters;
pub mod domain;

pub use domain::models::{Form, FormContext};
pub use domain::ports::inbound::FormHandlers;
pub use domain::ports::outbound::RecordLookup;
