//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::libraries::PostgresLibraryRepository;
pub use repositories::members::PostgresLibraryMembersRepository;
pub use repositories::shares::PostgresLibrarySharesRepository;
