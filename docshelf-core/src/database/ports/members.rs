use async_trait::async_trait;

use crate::application::{
    MemberInvite, MemberLibrarySort, MemberRoleModify, MemberStatusModify,
    MemberUninvite,
};
use crate::error::Result;
use crate::types::{LibraryID, LibraryMember, LibraryMemberSummary};

/// Membership mutations. Every write method is atomic: implementations
/// resolve the affected rows and apply the change inside one transaction,
/// failing as a whole.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryMembersRepository: Send + Sync {
    /// All members of a library, ordered by id.
    async fn list_members(&self, library_id: LibraryID) -> Result<Vec<LibraryMemberSummary>>;

    /// Insert one membership per invited id. Fails with
    /// [`crate::LibraryError::Conflict`] when any id is already a member, in
    /// which case nothing is persisted.
    async fn invite_members(
        &self,
        invite: &MemberInvite,
        now: i64,
    ) -> Result<Vec<LibraryMember>>;

    /// Delete the membership; [`crate::LibraryError::NotFound`] when absent.
    async fn uninvite_member(&self, uninvite: &MemberUninvite) -> Result<LibraryMember>;

    async fn modify_member_status(
        &self,
        modify: &MemberStatusModify,
        now: i64,
    ) -> Result<LibraryMember>;

    async fn modify_member_role(
        &self,
        modify: &MemberRoleModify,
        now: i64,
    ) -> Result<LibraryMember>;

    /// Move the member's library into a group at the given position. With no
    /// explicit position the library is placed after the group's last entry.
    async fn sort_member_library(
        &self,
        sort: &MemberLibrarySort,
        now: i64,
    ) -> Result<LibraryMember>;
}
