mod record_lookup;

pub use record_lookup::*;
