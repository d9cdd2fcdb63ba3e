//! # Docshelf Core
//!
//! Core library for the Docshelf library-management service: domain types for
//! libraries, members and share links, the operate-permission table, the
//! logic layer that applies membership state transitions, and the PostgreSQL
//! repositories behind it.
//!
//! ## Architecture
//!
//! - [`types`]: Libraries, members, groups, shares and their projections
//! - [`operate`]: Operation codes and the role table that gates them
//! - [`api_types`]: Request parameters, validation and the response envelope
//! - [`query`]: Share-list filtering and pagination
//! - [`database`]: Repository ports and their PostgreSQL implementations
//! - [`application`]: One function per library-management operation
//!
//! ## Feature Flags
//!
//! - `testing`: In-memory repositories implementing every port, for tests
//! - `postgres-tests`: Enables repository tests against a live database

pub mod api_types;
pub mod application;
pub mod database;
pub mod error;
pub mod operate;
pub mod query;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{LibraryError, Result};
pub use types::prelude::*;

/// Embedded schema migrations for the library-management tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Current time as unix epoch seconds, the unit every stored timestamp uses.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
