use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Library, LibraryGroup, LibraryGroupID, LibraryID, LibraryMember, UserID};

/// Read access to libraries, memberships and member groups, used to build
/// per-request library context.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    async fn get_library(&self, library_id: LibraryID) -> Result<Option<Library>>;

    async fn get_member(
        &self,
        library_id: LibraryID,
        uid: UserID,
    ) -> Result<Option<LibraryMember>>;

    async fn get_group(&self, group_id: LibraryGroupID) -> Result<Option<LibraryGroup>>;
}
