pub mod libraries;
pub mod members;
pub mod shares;

/// Column list matching [`crate::types::LibraryMember`].
pub(crate) const MEMBER_COLUMNS: &str = "id, library_id, uid, group_id, urole, status, sort, \
     apply_time, create_time, update_time";
