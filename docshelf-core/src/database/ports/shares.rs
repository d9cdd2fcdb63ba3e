use async_trait::async_trait;

use crate::error::Result;
use crate::query::{Page, Pagination, ShareListFilter};
use crate::types::{LibraryID, LibraryShare, LibraryShareID, ShareStatus};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibrarySharesRepository: Send + Sync {
    async fn get_share(&self, share_id: LibraryShareID) -> Result<Option<LibraryShare>>;

    async fn list_shares(
        &self,
        library_id: LibraryID,
        filter: &ShareListFilter,
        pagination: &Pagination,
    ) -> Result<Page<LibraryShare>>;

    /// Returns the number of rows changed; zero when the share is missing or
    /// already has `status`.
    async fn modify_share_status(
        &self,
        share_id: LibraryShareID,
        status: ShareStatus,
    ) -> Result<u64>;

    /// Returns the number of rows deleted.
    async fn remove_share(&self, share_id: LibraryShareID) -> Result<u64>;
}
