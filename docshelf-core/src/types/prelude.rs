//! Flat snapshot of the types surface, re-exported from the crate root.

pub use super::ids::{LibraryGroupID, LibraryID, LibraryShareID, UserID};
pub use super::library::{Library, LibraryGroup};
pub use super::member::{
    LibraryMember, LibraryMemberInfo, LibraryMemberSummary, LibraryRole,
    MemberStatus,
};
pub use super::share::{LibraryShare, ShareStatus};
