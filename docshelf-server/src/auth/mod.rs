pub mod middleware;
pub mod token;

use docshelf_core::UserID;

/// Authenticated caller, inserted into request extensions by
/// [`middleware::auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserID);
