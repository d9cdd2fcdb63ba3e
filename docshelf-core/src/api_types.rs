use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{
    MemberInvite, MemberLibrarySort, MemberRoleModify, MemberStatusModify,
    MemberUninvite, ShareStatusModify,
};
use crate::types::{
    Library, LibraryGroupID, LibraryID, LibraryMemberInfo, LibraryRole,
    LibraryShareID, ShareStatus, UserID,
};

// ===== Response envelope =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, carrying only a user-facing message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }
}

// ===== Library manager responses =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryManagerInfo {
    pub library_info: Library,
    /// `None` when the caller has no membership row (e.g. the owner).
    pub library_member: Option<LibraryMemberInfo>,
}

// ===== Request parameters =====

/// Parameter errors. Messages are static and shown to users as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid parameters")]
    InvalidParameters,

    #[error("invalid member in list")]
    InvalidMember,

    #[error("invalid status value")]
    InvalidStatus,
}

fn unset_sort() -> f64 {
    -1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemberLibrarySortRequest {
    pub library_group_id: i64,
    /// Negative means "place last in the group"
    #[serde(default = "unset_sort")]
    pub sort: f64,
}

impl Default for MemberLibrarySortRequest {
    fn default() -> Self {
        Self {
            library_group_id: 0,
            sort: unset_sort(),
        }
    }
}

impl MemberLibrarySortRequest {
    pub fn validate(
        self,
        library_id: LibraryID,
        caller: UserID,
    ) -> Result<MemberLibrarySort, ValidationError> {
        if self.library_group_id < 0 || !self.sort.is_finite() {
            return Err(ValidationError::InvalidParameters);
        }
        Ok(MemberLibrarySort {
            library_id,
            uid: caller,
            group_id: LibraryGroupID(self.library_group_id),
            sort: (self.sort >= 0.0).then_some(self.sort),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberInviteRequest {
    pub member_ids: Vec<i64>,
}

impl MemberInviteRequest {
    pub fn validate(self, library_id: LibraryID) -> Result<MemberInvite, ValidationError> {
        if self.member_ids.is_empty() || self.member_ids.iter().any(|id| *id <= 0) {
            return Err(ValidationError::InvalidMember);
        }

        let mut member_ids: Vec<UserID> = self.member_ids.into_iter().map(UserID).collect();
        member_ids.sort_unstable();
        member_ids.dedup();

        Ok(MemberInvite {
            library_id,
            member_ids,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberUninviteRequest {
    pub member_id: i64,
}

impl MemberUninviteRequest {
    pub fn validate(self, library_id: LibraryID) -> Result<MemberUninvite, ValidationError> {
        if self.member_id <= 0 {
            return Err(ValidationError::InvalidParameters);
        }
        Ok(MemberUninvite {
            library_id,
            uid: UserID(self.member_id),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberStatusModifyRequest {
    pub member_id: i64,
    pub status: i32,
}

impl MemberStatusModifyRequest {
    pub fn validate(self, library_id: LibraryID) -> Result<MemberStatusModify, ValidationError> {
        if self.member_id <= 0 {
            return Err(ValidationError::InvalidParameters);
        }
        Ok(MemberStatusModify {
            library_id,
            uid: UserID(self.member_id),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberRoleModifyRequest {
    pub member_id: i64,
    pub library_role_id: i32,
}

impl MemberRoleModifyRequest {
    pub fn validate(self, library_id: LibraryID) -> Result<MemberRoleModify, ValidationError> {
        if self.member_id <= 0 || self.library_role_id <= 0 {
            return Err(ValidationError::InvalidParameters);
        }
        // Ownership is not transferable through role changes.
        let role = LibraryRole::from_code(self.library_role_id)
            .filter(|role| *role != LibraryRole::Owner)
            .ok_or(ValidationError::InvalidParameters)?;

        Ok(MemberRoleModify {
            library_id,
            uid: UserID(self.member_id),
            role,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareStatusModifyRequest {
    pub status: i32,
}

impl ShareStatusModifyRequest {
    pub fn validate(
        self,
        share_id: LibraryShareID,
    ) -> Result<ShareStatusModify, ValidationError> {
        let status = ShareStatus::from_code(self.status).ok_or(ValidationError::InvalidStatus)?;
        Ok(ShareStatusModify { share_id, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIB: LibraryID = LibraryID(5);

    #[test]
    fn sort_request_rejects_negative_group() {
        let request = MemberLibrarySortRequest {
            library_group_id: -1,
            sort: 3.0,
        };
        assert_eq!(
            request.validate(LIB, UserID(1)),
            Err(ValidationError::InvalidParameters)
        );
    }

    #[test]
    fn sort_request_treats_negative_sort_as_unset() {
        let sort = MemberLibrarySortRequest::default()
            .validate(LIB, UserID(1))
            .unwrap();
        assert_eq!(sort.group_id, LibraryGroupID::UNGROUPED);
        assert_eq!(sort.sort, None);

        let sort = MemberLibrarySortRequest {
            library_group_id: 2,
            sort: 1.5,
        }
        .validate(LIB, UserID(1))
        .unwrap();
        assert_eq!(sort.sort, Some(1.5));
    }

    #[test]
    fn sort_request_defaults_when_fields_are_missing() {
        let request: MemberLibrarySortRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, MemberLibrarySortRequest::default());
        assert_eq!(request.sort, -1.0);
    }

    #[test]
    fn invite_request_rejects_empty_and_non_positive_ids() {
        assert_eq!(
            MemberInviteRequest::default().validate(LIB),
            Err(ValidationError::InvalidMember)
        );
        assert_eq!(
            MemberInviteRequest {
                member_ids: vec![3, 0]
            }
            .validate(LIB),
            Err(ValidationError::InvalidMember)
        );
    }

    #[test]
    fn invite_request_collapses_duplicates() {
        let invite = MemberInviteRequest {
            member_ids: vec![9, 3, 9, 4],
        }
        .validate(LIB)
        .unwrap();
        assert_eq!(invite.member_ids, vec![UserID(3), UserID(4), UserID(9)]);
    }

    #[test]
    fn member_id_must_be_positive() {
        for member_id in [0, -4] {
            assert_eq!(
                MemberUninviteRequest { member_id }.validate(LIB),
                Err(ValidationError::InvalidParameters)
            );
            assert_eq!(
                MemberStatusModifyRequest {
                    member_id,
                    status: 1
                }
                .validate(LIB),
                Err(ValidationError::InvalidParameters)
            );
        }
    }

    #[test]
    fn status_modify_passes_status_through_unchecked() {
        let modify = MemberStatusModifyRequest {
            member_id: 8,
            status: 77,
        }
        .validate(LIB)
        .unwrap();
        assert_eq!(modify.status, 77);
    }

    #[test]
    fn role_modify_checks_both_ids_independently() {
        let bad_member = MemberRoleModifyRequest {
            member_id: 0,
            library_role_id: 2,
        };
        let bad_role = MemberRoleModifyRequest {
            member_id: 2,
            library_role_id: 0,
        };
        assert_eq!(bad_member.validate(LIB), Err(ValidationError::InvalidParameters));
        assert_eq!(bad_role.validate(LIB), Err(ValidationError::InvalidParameters));
    }

    #[test]
    fn role_modify_rejects_unknown_and_owner_roles() {
        for library_role_id in [LibraryRole::Owner.code(), 9] {
            assert_eq!(
                MemberRoleModifyRequest {
                    member_id: 2,
                    library_role_id
                }
                .validate(LIB),
                Err(ValidationError::InvalidParameters)
            );
        }
        let modify = MemberRoleModifyRequest {
            member_id: 2,
            library_role_id: LibraryRole::Editor.code(),
        }
        .validate(LIB)
        .unwrap();
        assert_eq!(modify.role, LibraryRole::Editor);
    }

    #[test]
    fn share_status_must_be_one_or_two() {
        for status in [0, 3, -1, 100] {
            assert_eq!(
                ShareStatusModifyRequest { status }.validate(LibraryShareID(1)),
                Err(ValidationError::InvalidStatus)
            );
        }
        for (status, expected) in [(1, ShareStatus::Active), (2, ShareStatus::Inactive)] {
            let modify = ShareStatusModifyRequest { status }
                .validate(LibraryShareID(1))
                .unwrap();
            assert_eq!(modify.status, expected);
        }
    }

    #[test]
    fn manager_info_serializes_camel_case_with_null_member() {
        let info = LibraryManagerInfo {
            library_info: Library {
                id: LIB,
                uid: UserID(1),
                team_id: 0,
                name: "Specs".into(),
                description: "".into(),
                create_time: 0,
                update_time: 0,
                cover: "".into(),
            },
            library_member: None,
        };
        let value = serde_json::to_value(&info).unwrap();
        assert!(value["libraryMember"].is_null());
        assert_eq!(value["libraryInfo"]["name"], "Specs");
        assert_eq!(value["libraryInfo"]["desc"], "");
    }
}
