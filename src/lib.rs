//! Course Registry - student, course and enrollment management API
//!
//! An in-memory REST backend: students register and log in, courses carry
//! a seat capacity, and enrollments take and release seats.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: The shared in-memory database
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Bind somewhere else
//! cargo run -- serve --host 127.0.0.1 --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Course, Enrollment, EnrollmentStatus, Password, Student};
pub use errors::{AppError, AppResult};
pub use infra::Database;
