use serde::{Deserialize, Serialize};

use super::ids::{LibraryGroupID, LibraryID, UserID};

/// Library record, projected to the fields the manager endpoints expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Library {
    pub id: LibraryID,
    /// Owner of the library
    pub uid: UserID,
    pub team_id: i64,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub create_time: i64,
    pub update_time: i64,
    pub cover: String,
}

impl Library {
    pub fn is_owned_by(&self, uid: UserID) -> bool {
        self.uid == uid
    }
}

/// A member's personal grouping of libraries, used as a sort target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LibraryGroup {
    pub id: LibraryGroupID,
    pub uid: UserID,
    pub name: String,
    pub sort: f64,
    pub create_time: i64,
}
