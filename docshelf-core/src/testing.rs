//! In-memory implementation of every repository port.
//!
//! Mirrors the PostgreSQL adapters' observable behaviour (ordering, filters,
//! all-or-nothing batch inserts, not-found/conflict errors) so logic and HTTP
//! tests can run without a database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::application::{
    MemberInvite, MemberLibrarySort, MemberRoleModify, MemberStatusModify,
    MemberUninvite,
};
use crate::database::ports::{
    libraries::LibraryRepository, members::LibraryMembersRepository,
    shares::LibrarySharesRepository,
};
use crate::error::{LibraryError, Result};
use crate::query::{Page, Pagination, ShareListFilter, ShareSortField, SortDirection};
use crate::types::{
    Library, LibraryGroup, LibraryGroupID, LibraryID, LibraryMember,
    LibraryMemberSummary, LibraryRole, LibraryShare, LibraryShareID, MemberStatus,
    ShareStatus, UserID,
};

#[derive(Debug, Default)]
struct State {
    libraries: BTreeMap<LibraryID, Library>,
    members: BTreeMap<i64, LibraryMember>,
    groups: BTreeMap<LibraryGroupID, LibraryGroup>,
    shares: BTreeMap<LibraryShareID, LibraryShare>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn find_member(&self, library_id: LibraryID, uid: UserID) -> Option<&LibraryMember> {
        self.members
            .values()
            .find(|m| m.library_id == library_id && m.uid == uid)
    }

    fn find_member_mut(
        &mut self,
        library_id: LibraryID,
        uid: UserID,
    ) -> Result<&mut LibraryMember> {
        self.members
            .values_mut()
            .find(|m| m.library_id == library_id && m.uid == uid)
            .ok_or_else(|| LibraryError::NotFound(format!("member {uid} of library {library_id}")))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a library under its own id.
    pub fn insert_library(&self, library: Library) -> Library {
        self.state().libraries.insert(library.id, library.clone());
        library
    }

    pub fn insert_member(
        &self,
        library_id: LibraryID,
        uid: UserID,
        role: LibraryRole,
        status: MemberStatus,
    ) -> LibraryMember {
        let mut state = self.state();
        let member = LibraryMember {
            id: state.next_id(),
            library_id,
            uid,
            group_id: LibraryGroupID::UNGROUPED,
            urole: role.code(),
            status: status.code(),
            sort: 0.0,
            apply_time: 0,
            create_time: 0,
            update_time: 0,
        };
        state.members.insert(member.id, member.clone());
        member
    }

    pub fn insert_group(&self, uid: UserID, name: &str) -> LibraryGroup {
        let mut state = self.state();
        let group = LibraryGroup {
            id: LibraryGroupID(state.next_id()),
            uid,
            name: name.to_string(),
            sort: 0.0,
            create_time: 0,
        };
        state.groups.insert(group.id, group.clone());
        group
    }

    pub fn insert_share(&self, library_id: LibraryID, name: &str, create_time: i64) -> LibraryShare {
        let mut state = self.state();
        let id = state.next_id();
        let share = LibraryShare {
            id: LibraryShareID(id),
            library_id,
            doc_id: id,
            uid: UserID(1),
            share_name: name.to_string(),
            share_code: format!("code{id}"),
            is_protected: false,
            access_count: 0,
            create_time,
            expire_time: 0,
            status: ShareStatus::Active.code(),
        };
        state.shares.insert(share.id, share.clone());
        share
    }

    pub fn member(&self, library_id: LibraryID, uid: UserID) -> Option<LibraryMember> {
        self.state().find_member(library_id, uid).cloned()
    }

    pub fn member_count(&self, library_id: LibraryID) -> usize {
        self.state()
            .members
            .values()
            .filter(|m| m.library_id == library_id)
            .count()
    }

    pub fn share(&self, share_id: LibraryShareID) -> Option<LibraryShare> {
        self.state().shares.get(&share_id).cloned()
    }
}

#[async_trait]
impl LibraryRepository for InMemoryStore {
    async fn get_library(&self, library_id: LibraryID) -> Result<Option<Library>> {
        Ok(self.state().libraries.get(&library_id).cloned())
    }

    async fn get_member(
        &self,
        library_id: LibraryID,
        uid: UserID,
    ) -> Result<Option<LibraryMember>> {
        Ok(self.member(library_id, uid))
    }

    async fn get_group(&self, group_id: LibraryGroupID) -> Result<Option<LibraryGroup>> {
        Ok(self.state().groups.get(&group_id).cloned())
    }
}

#[async_trait]
impl LibraryMembersRepository for InMemoryStore {
    async fn list_members(&self, library_id: LibraryID) -> Result<Vec<LibraryMemberSummary>> {
        Ok(self
            .state()
            .members
            .values()
            .filter(|m| m.library_id == library_id)
            .map(LibraryMember::to_summary)
            .collect())
    }

    async fn invite_members(
        &self,
        invite: &MemberInvite,
        now: i64,
    ) -> Result<Vec<LibraryMember>> {
        let mut state = self.state();

        // Check the whole batch before writing anything.
        if let Some(uid) = invite
            .member_ids
            .iter()
            .find(|uid| state.find_member(invite.library_id, **uid).is_some())
        {
            return Err(LibraryError::Conflict(format!(
                "user {uid} is already a member of library {}",
                invite.library_id
            )));
        }

        let mut invited = Vec::with_capacity(invite.member_ids.len());
        for uid in &invite.member_ids {
            let member = LibraryMember {
                id: state.next_id(),
                library_id: invite.library_id,
                uid: *uid,
                group_id: LibraryGroupID::UNGROUPED,
                urole: MemberInvite::DEFAULT_ROLE.code(),
                status: MemberStatus::Normal.code(),
                sort: 0.0,
                apply_time: 0,
                create_time: now,
                update_time: now,
            };
            state.members.insert(member.id, member.clone());
            invited.push(member);
        }
        Ok(invited)
    }

    async fn uninvite_member(&self, uninvite: &MemberUninvite) -> Result<LibraryMember> {
        let mut state = self.state();
        let id = state.find_member_mut(uninvite.library_id, uninvite.uid)?.id;
        state
            .members
            .remove(&id)
            .ok_or_else(|| LibraryError::Internal("member vanished during removal".to_string()))
    }

    async fn modify_member_status(
        &self,
        modify: &MemberStatusModify,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut state = self.state();
        let member = state.find_member_mut(modify.library_id, modify.uid)?;
        member.status = modify.status;
        member.update_time = now;
        Ok(member.clone())
    }

    async fn modify_member_role(
        &self,
        modify: &MemberRoleModify,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut state = self.state();
        let member = state.find_member_mut(modify.library_id, modify.uid)?;
        member.urole = modify.role.code();
        member.update_time = now;
        Ok(member.clone())
    }

    async fn sort_member_library(
        &self,
        sort: &MemberLibrarySort,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut state = self.state();
        let member_id = state.find_member_mut(sort.library_id, sort.uid)?.id;

        let position = sort.sort.unwrap_or_else(|| {
            state
                .members
                .values()
                .filter(|m| m.uid == sort.uid && m.group_id == sort.group_id && m.id != member_id)
                .map(|m| m.sort)
                .fold(0.0_f64, f64::max)
                + 1.0
        });

        let member = state.find_member_mut(sort.library_id, sort.uid)?;
        member.group_id = sort.group_id;
        member.sort = position;
        member.update_time = now;
        Ok(member.clone())
    }
}

#[async_trait]
impl LibrarySharesRepository for InMemoryStore {
    async fn get_share(&self, share_id: LibraryShareID) -> Result<Option<LibraryShare>> {
        Ok(self.share(share_id))
    }

    async fn list_shares(
        &self,
        library_id: LibraryID,
        filter: &ShareListFilter,
        pagination: &Pagination,
    ) -> Result<Page<LibraryShare>> {
        let mut matching: Vec<LibraryShare> = self
            .state()
            .shares
            .values()
            .filter(|s| s.library_id == library_id && filter.matches(s))
            .cloned()
            .collect();

        let order = pagination.order_or_default();
        matching.sort_by(|a, b| {
            let key = |s: &LibraryShare| match order.field {
                ShareSortField::Id => s.id.as_i64(),
                ShareSortField::CreateTime => s.create_time,
                ShareSortField::ExpireTime => s.expire_time,
                ShareSortField::AccessCount => s.access_count,
            };
            let ordering = key(a).cmp(&key(b)).then(a.id.cmp(&b.id));
            match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok(Page::new(items, pagination, total))
    }

    async fn modify_share_status(
        &self,
        share_id: LibraryShareID,
        status: ShareStatus,
    ) -> Result<u64> {
        Ok(match self.state().shares.get_mut(&share_id) {
            Some(share) if share.status != status.code() => {
                share.status = status.code();
                1
            }
            _ => 0,
        })
    }

    async fn remove_share(&self, share_id: LibraryShareID) -> Result<u64> {
        Ok(u64::from(self.state().shares.remove(&share_id).is_some()))
    }
}
