use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a document library
    LibraryID
);

numeric_id!(
    /// Identifier of a user account (owned by the upstream identity service)
    UserID
);

numeric_id!(
    /// Identifier of a library share link
    LibraryShareID
);

numeric_id!(
    /// Identifier of a member-owned library group; `0` means ungrouped
    LibraryGroupID
);

impl LibraryGroupID {
    pub const UNGROUPED: LibraryGroupID = LibraryGroupID(0);

    pub fn is_ungrouped(&self) -> bool {
        self.0 == 0
    }
}
