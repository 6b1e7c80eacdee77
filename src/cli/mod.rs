//! CLI module - Command-line interface for the application.
//!
//! Provides `serve` to start the HTTP server.

pub mod args;

pub use args::{Cli, Commands, ServeArgs};
