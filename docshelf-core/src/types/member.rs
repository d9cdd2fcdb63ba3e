use serde::{Deserialize, Serialize};

use super::ids::{LibraryGroupID, LibraryID, UserID};

/// Role a member holds within a library (`urole`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum LibraryRole {
    Owner = 1,
    Admin = 2,
    Editor = 3,
    Reader = 4,
}

impl LibraryRole {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Owner),
            2 => Some(Self::Admin),
            3 => Some(Self::Editor),
            4 => Some(Self::Reader),
            _ => None,
        }
    }

    /// Whether the role can manage members and share links.
    pub fn is_manager(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl From<LibraryRole> for i32 {
    fn from(role: LibraryRole) -> Self {
        role.code()
    }
}

impl TryFrom<i32> for LibraryRole {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown library role {code}"))
    }
}

/// Membership status codes. Stored as plain integers because status-modify
/// accepts any value; these are the ones the permission checks interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    Normal = 1,
    Disabled = 2,
    Pending = 3,
}

impl MemberStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::Disabled),
            3 => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Full membership row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryMember {
    pub id: i64,
    pub library_id: LibraryID,
    pub uid: UserID,
    pub group_id: LibraryGroupID,
    pub urole: i32,
    pub status: i32,
    pub sort: f64,
    pub apply_time: i64,
    pub create_time: i64,
    pub update_time: i64,
}

impl LibraryMember {
    pub fn role(&self) -> Option<LibraryRole> {
        LibraryRole::from_code(self.urole)
    }

    pub fn member_status(&self) -> Option<MemberStatus> {
        MemberStatus::from_code(self.status)
    }

    pub fn to_info(&self) -> LibraryMemberInfo {
        LibraryMemberInfo {
            group_id: self.group_id,
            uid: self.uid,
            urole: self.urole,
            apply_time: self.apply_time,
        }
    }

    pub fn to_summary(&self) -> LibraryMemberSummary {
        LibraryMemberSummary {
            id: self.id,
            library_id: self.library_id,
            uid: self.uid,
            urole: self.urole,
            status: self.status,
            apply_time: self.apply_time,
            create_time: self.create_time,
            update_time: self.update_time,
        }
    }
}

/// Caller's own membership as shown by the manager info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryMemberInfo {
    pub group_id: LibraryGroupID,
    pub uid: UserID,
    pub urole: i32,
    pub apply_time: i64,
}

/// Row of the member collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryMemberSummary {
    pub id: i64,
    pub library_id: LibraryID,
    pub uid: UserID,
    pub urole: i32,
    pub status: i32,
    pub apply_time: i64,
    pub create_time: i64,
    pub update_time: i64,
}
