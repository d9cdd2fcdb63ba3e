use tracing::{info, warn};

use crate::database::ports::shares::LibrarySharesRepository;
use crate::error::Result;
use crate::query::{Page, Pagination, ShareListFilter};
use crate::types::{LibraryID, LibraryShare, LibraryShareID, ShareStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareStatusModify {
    pub share_id: LibraryShareID,
    pub status: ShareStatus,
}

pub async fn list_shares(
    shares: &dyn LibrarySharesRepository,
    library_id: LibraryID,
    filter: &ShareListFilter,
    pagination: &Pagination,
) -> Result<Page<LibraryShare>> {
    shares.list_shares(library_id, filter, pagination).await
}

/// Returns `false` when the update touched no row; callers surface that as a
/// generic failure.
pub async fn modify_share_status(
    shares: &dyn LibrarySharesRepository,
    modify: ShareStatusModify,
) -> Result<bool> {
    let affected = shares
        .modify_share_status(modify.share_id, modify.status)
        .await?;

    if affected == 0 {
        warn!(share_id = %modify.share_id, "share status update affected no rows");
        return Ok(false);
    }

    info!(
        share_id = %modify.share_id,
        status = modify.status.code(),
        "library share status modified"
    );
    Ok(true)
}

pub async fn remove_share(
    shares: &dyn LibrarySharesRepository,
    share_id: LibraryShareID,
) -> Result<()> {
    let removed = shares.remove_share(share_id).await?;
    info!(share_id = %share_id, removed, "library share removed");
    Ok(())
}
