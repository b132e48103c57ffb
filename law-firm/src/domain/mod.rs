mod email;
mod error;
pub mod models;
pub mod ports;
pub mod rounding;
pub mod services;

pub use email::*;
pub use error::*;
