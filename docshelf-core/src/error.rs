use thiserror::Error;

use crate::operate::OperateError;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Operation not permitted: {0}")]
    Forbidden(#[from] OperateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
