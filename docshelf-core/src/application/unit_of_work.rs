use std::fmt;
use std::sync::Arc;

use crate::database::infrastructure::postgres::{
    PostgresLibraryMembersRepository, PostgresLibraryRepository,
    PostgresLibrarySharesRepository,
};
use crate::database::ports::{
    libraries::LibraryRepository, members::LibraryMembersRepository,
    shares::LibrarySharesRepository,
};
use crate::database::postgres::PostgresDatabase;

/// Aggregates the repository ports used by application functions.
#[derive(Clone)]
pub struct LibraryUnitOfWork {
    pub libraries: Arc<dyn LibraryRepository>,
    pub members: Arc<dyn LibraryMembersRepository>,
    pub shares: Arc<dyn LibrarySharesRepository>,
}

impl fmt::Debug for LibraryUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryUnitOfWork").finish_non_exhaustive()
    }
}

impl LibraryUnitOfWork {
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        let pool = db.pool().clone();
        Self {
            libraries: Arc::new(PostgresLibraryRepository::new(pool.clone())),
            members: Arc::new(PostgresLibraryMembersRepository::new(pool.clone())),
            shares: Arc::new(PostgresLibrarySharesRepository::new(pool)),
        }
    }

    /// Build from a single value implementing every port, such as the
    /// in-memory store used by tests.
    pub fn from_shared<R>(repo: Arc<R>) -> Self
    where
        R: LibraryRepository + LibraryMembersRepository + LibrarySharesRepository + 'static,
    {
        Self {
            libraries: repo.clone(),
            members: repo.clone(),
            shares: repo,
        }
    }
}
