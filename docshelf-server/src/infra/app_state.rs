use std::{fmt, sync::Arc};

use anyhow::Context;
use docshelf_core::application::LibraryUnitOfWork;
use docshelf_core::database::PostgresDatabase;

use crate::auth::token::TokenSigner;
use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<LibraryUnitOfWork>,
    /// Absent when the repositories are not PostgreSQL-backed (tests).
    pub postgres: Option<Arc<PostgresDatabase>>,
    pub token_signer: Arc<TokenSigner>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        unit_of_work: LibraryUnitOfWork,
        postgres: Option<Arc<PostgresDatabase>>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let token_signer =
            TokenSigner::new(&config.auth_token_key).context("invalid AUTH_TOKEN_KEY")?;

        Ok(Self {
            unit_of_work: Arc::new(unit_of_work),
            postgres,
            token_signer: Arc::new(token_signer),
            config: Arc::new(config),
        })
    }

    pub fn with_postgres(postgres: Arc<PostgresDatabase>, config: Config) -> anyhow::Result<Self> {
        let unit_of_work = LibraryUnitOfWork::from_postgres(&postgres);
        Self::new(unit_of_work, Some(postgres), config)
    }

    pub fn unit_of_work(&self) -> &LibraryUnitOfWork {
        &self.unit_of_work
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
