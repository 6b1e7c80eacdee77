//! HTTP request handlers.

pub mod auth_handler;
pub mod course_handler;
pub mod enrollment_handler;
pub mod health_handler;
pub mod student_handler;

pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use enrollment_handler::enrollment_routes;
pub use health_handler::health_routes;
pub use student_handler::student_routes;

use uuid::Uuid;

use crate::config::MSG_FIELDS_REQUIRED;
use crate::errors::{AppError, AppResult};

/// Parse a path id. Anything that is not a UUID cannot name a record, so it
/// reports the entity's not-found message.
fn parse_id(raw: &str, not_found: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found))
}

/// Unwrap a field that validation has already required.
fn required<T>(value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(MSG_FIELDS_REQUIRED))
}

/// Parse an optional query value, treating empty as absent.
fn parse_query<T: std::str::FromStr>(raw: Option<&str>, name: &str) -> AppResult<Option<T>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid {}", name))),
        None => Ok(None),
    }
}
