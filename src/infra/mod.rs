//! Infrastructure layer - data storage
//!
//! All records live in process memory behind a single lock.

pub mod db;

pub use db::{Collections, Database, StoreStats};
