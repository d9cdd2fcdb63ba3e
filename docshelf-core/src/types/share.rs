use serde::{Deserialize, Serialize};

use super::ids::{LibraryID, LibraryShareID, UserID};

/// Share link status. Only these two values may be written through the
/// status-modify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ShareStatus {
    Active = 1,
    Inactive = 2,
}

impl ShareStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Active),
            2 => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl From<ShareStatus> for i32 {
    fn from(status: ShareStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for ShareStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown share status {code}"))
    }
}

/// Share link row as listed by the share list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryShare {
    pub id: LibraryShareID,
    pub library_id: LibraryID,
    pub doc_id: i64,
    pub uid: UserID,
    pub share_name: String,
    pub share_code: String,
    pub is_protected: bool,
    pub access_count: i64,
    pub create_time: i64,
    pub expire_time: i64,
    pub status: i32,
}
