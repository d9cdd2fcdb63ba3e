//! Membership state transitions. Each function applies one validated
//! parameter struct through a single atomic repository call.

use tracing::{debug, info};

use crate::database::ports::libraries::LibraryRepository;
use crate::database::ports::members::LibraryMembersRepository;
use crate::error::{LibraryError, Result};
use crate::types::{
    Library, LibraryGroupID, LibraryID, LibraryMember, LibraryRole, UserID,
};
use crate::unix_now;

/// Place one of the caller's libraries inside one of the caller's groups.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLibrarySort {
    pub library_id: LibraryID,
    pub uid: UserID,
    pub group_id: LibraryGroupID,
    /// `None` appends after the group's last library
    pub sort: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInvite {
    pub library_id: LibraryID,
    /// Distinct, positive user ids
    pub member_ids: Vec<UserID>,
}

impl MemberInvite {
    pub const DEFAULT_ROLE: LibraryRole = LibraryRole::Reader;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberUninvite {
    pub library_id: LibraryID,
    pub uid: UserID,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberStatusModify {
    pub library_id: LibraryID,
    pub uid: UserID,
    pub status: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRoleModify {
    pub library_id: LibraryID,
    pub uid: UserID,
    pub role: LibraryRole,
}

fn ensure_not_owner(library: &Library, uid: UserID) -> Result<()> {
    if library.is_owned_by(uid) {
        return Err(LibraryError::Conflict(
            "the library owner's membership cannot be changed".to_string(),
        ));
    }
    Ok(())
}

pub async fn sort_member_library(
    libraries: &dyn LibraryRepository,
    members: &dyn LibraryMembersRepository,
    sort: MemberLibrarySort,
) -> Result<LibraryMember> {
    if !sort.group_id.is_ungrouped() {
        libraries
            .get_group(sort.group_id)
            .await?
            .filter(|group| group.uid == sort.uid)
            .ok_or_else(|| LibraryError::NotFound(format!("library group {}", sort.group_id)))?;
    }

    let member = members.sort_member_library(&sort, unix_now()).await?;
    debug!(
        library_id = %sort.library_id,
        uid = %sort.uid,
        group_id = %member.group_id,
        sort = member.sort,
        "member library sorted"
    );
    Ok(member)
}

pub async fn invite_members(
    members: &dyn LibraryMembersRepository,
    library: &Library,
    invite: MemberInvite,
) -> Result<Vec<LibraryMember>> {
    if invite.member_ids.iter().any(|uid| library.is_owned_by(*uid)) {
        return Err(LibraryError::Conflict(
            "the library owner is already a member".to_string(),
        ));
    }

    let invited = members.invite_members(&invite, unix_now()).await?;
    info!(
        library_id = %invite.library_id,
        count = invited.len(),
        "library members invited"
    );
    Ok(invited)
}

pub async fn uninvite_member(
    members: &dyn LibraryMembersRepository,
    library: &Library,
    uninvite: MemberUninvite,
) -> Result<()> {
    ensure_not_owner(library, uninvite.uid)?;

    let removed = members.uninvite_member(&uninvite).await?;
    info!(
        library_id = %uninvite.library_id,
        uid = %removed.uid,
        "library member removed"
    );
    Ok(())
}

pub async fn modify_member_status(
    members: &dyn LibraryMembersRepository,
    library: &Library,
    modify: MemberStatusModify,
) -> Result<LibraryMember> {
    ensure_not_owner(library, modify.uid)?;

    let member = members.modify_member_status(&modify, unix_now()).await?;
    info!(
        library_id = %modify.library_id,
        uid = %modify.uid,
        status = member.status,
        "library member status modified"
    );
    Ok(member)
}

pub async fn modify_member_role(
    members: &dyn LibraryMembersRepository,
    library: &Library,
    modify: MemberRoleModify,
) -> Result<LibraryMember> {
    ensure_not_owner(library, modify.uid)?;

    let member = members.modify_member_role(&modify, unix_now()).await?;
    info!(
        library_id = %modify.library_id,
        uid = %modify.uid,
        urole = member.urole,
        "library member role modified"
    );
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::libraries::MockLibraryRepository;
    use crate::database::ports::members::MockLibraryMembersRepository;
    use crate::testing::InMemoryStore;
    use crate::types::{LibraryGroup, MemberStatus};

    fn library() -> Library {
        Library {
            id: LibraryID(1),
            uid: UserID(100),
            team_id: 0,
            name: "Handbook".into(),
            description: String::new(),
            create_time: 0,
            update_time: 0,
            cover: String::new(),
        }
    }

    #[tokio::test]
    async fn owner_cannot_be_uninvited_or_modified() {
        let mut members = MockLibraryMembersRepository::new();
        members.expect_uninvite_member().times(0);
        members.expect_modify_member_status().times(0);
        members.expect_modify_member_role().times(0);

        let lib = library();
        let owner = lib.uid;

        let err = uninvite_member(
            &members,
            &lib,
            MemberUninvite {
                library_id: lib.id,
                uid: owner,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::Conflict(_)));

        let err = modify_member_status(
            &members,
            &lib,
            MemberStatusModify {
                library_id: lib.id,
                uid: owner,
                status: MemberStatus::Disabled.code(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::Conflict(_)));

        let err = modify_member_role(
            &members,
            &lib,
            MemberRoleModify {
                library_id: lib.id,
                uid: owner,
                role: LibraryRole::Reader,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::Conflict(_)));
    }

    #[tokio::test]
    async fn inviting_the_owner_writes_nothing() {
        let mut members = MockLibraryMembersRepository::new();
        members.expect_invite_members().times(0);

        let lib = library();
        let err = invite_members(
            &members,
            &lib,
            MemberInvite {
                library_id: lib.id,
                member_ids: vec![UserID(5), lib.uid],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::Conflict(_)));
    }

    #[tokio::test]
    async fn sort_into_foreign_group_writes_nothing() {
        let mut libraries = MockLibraryRepository::new();
        libraries.expect_get_group().returning(|id| {
            Ok(Some(LibraryGroup {
                id,
                uid: UserID(999),
                name: "not yours".into(),
                sort: 0.0,
                create_time: 0,
            }))
        });
        let mut members = MockLibraryMembersRepository::new();
        members.expect_sort_member_library().times(0);

        let err = sort_member_library(
            &libraries,
            &members,
            MemberLibrarySort {
                library_id: LibraryID(1),
                uid: UserID(7),
                group_id: LibraryGroupID(3),
                sort: Some(2.0),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
    }

    #[tokio::test]
    async fn ungrouped_sort_skips_group_lookup() {
        let mut libraries = MockLibraryRepository::new();
        libraries.expect_get_group().times(0);

        let store = InMemoryStore::new();
        let lib = store.insert_library(library());
        store.insert_member(lib.id, UserID(7), LibraryRole::Editor, MemberStatus::Normal);

        let member = sort_member_library(
            &libraries,
            &store,
            MemberLibrarySort {
                library_id: lib.id,
                uid: UserID(7),
                group_id: LibraryGroupID::UNGROUPED,
                sort: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(member.group_id, LibraryGroupID::UNGROUPED);
        assert_eq!(member.sort, 1.0);
    }

    #[tokio::test]
    async fn invite_is_all_or_nothing() {
        let store = InMemoryStore::new();
        let lib = store.insert_library(library());
        // B is already a member, so the batch must fail as a whole.
        store.insert_member(lib.id, UserID(2), LibraryRole::Reader, MemberStatus::Normal);

        let err = invite_members(
            &store,
            &lib,
            MemberInvite {
                library_id: lib.id,
                member_ids: vec![UserID(1), UserID(2), UserID(3)],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::Conflict(_)));

        assert!(store.member(lib.id, UserID(1)).is_none());
        assert!(store.member(lib.id, UserID(3)).is_none());
        assert_eq!(store.member_count(lib.id), 1);
    }

    #[tokio::test]
    async fn invite_creates_normal_readers() {
        let store = InMemoryStore::new();
        let lib = store.insert_library(library());

        let invited = invite_members(
            &store,
            &lib,
            MemberInvite {
                library_id: lib.id,
                member_ids: vec![UserID(1), UserID(3)],
            },
        )
        .await
        .unwrap();

        assert_eq!(invited.len(), 2);
        for member in invited {
            assert_eq!(member.role(), Some(MemberInvite::DEFAULT_ROLE));
            assert_eq!(member.member_status(), Some(MemberStatus::Normal));
            assert_eq!(member.group_id, LibraryGroupID::UNGROUPED);
        }
        assert_eq!(store.member_count(lib.id), 2);
    }

    #[tokio::test]
    async fn uninvite_of_missing_member_is_not_found() {
        let store = InMemoryStore::new();
        let lib = store.insert_library(library());

        let err = uninvite_member(
            &store,
            &lib,
            MemberUninvite {
                library_id: lib.id,
                uid: UserID(42),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
    }

    #[tokio::test]
    async fn role_and_status_changes_persist() {
        let store = InMemoryStore::new();
        let lib = store.insert_library(library());
        store.insert_member(lib.id, UserID(9), LibraryRole::Reader, MemberStatus::Normal);

        modify_member_role(
            &store,
            &lib,
            MemberRoleModify {
                library_id: lib.id,
                uid: UserID(9),
                role: LibraryRole::Admin,
            },
        )
        .await
        .unwrap();
        modify_member_status(
            &store,
            &lib,
            MemberStatusModify {
                library_id: lib.id,
                uid: UserID(9),
                status: MemberStatus::Disabled.code(),
            },
        )
        .await
        .unwrap();

        let member = store.member(lib.id, UserID(9)).unwrap();
        assert_eq!(member.role(), Some(LibraryRole::Admin));
        assert_eq!(member.member_status(), Some(MemberStatus::Disabled));
    }
}
