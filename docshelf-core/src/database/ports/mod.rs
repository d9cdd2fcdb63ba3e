//! Repository ports (interfaces) for the library-management context.
//! Application functions depend on these; PostgreSQL adapters live under
//! `database::infrastructure::postgres`, in-memory ones under `testing`.

pub mod libraries;
pub mod members;
pub mod shares;
