mod form_handlers;

pub use form_handlers::*;
