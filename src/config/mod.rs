//! Application configuration module
//!
//! Handles environment variables, application-wide constants and the
//! response messages shared by the services.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
