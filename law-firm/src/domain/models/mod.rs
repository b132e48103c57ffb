mod client;
mod form;
mod ids;
mod legal_case;
mod lookup;
mod time_entry;

pub use client::*;
pub use form::*;
pub use ids::*;
pub use legal_case::*;
pub use lookup::*;
pub use time_entry::*;
