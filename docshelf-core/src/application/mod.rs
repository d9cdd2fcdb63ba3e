//! Library-management operations. Handlers validate request parameters into
//! the parameter structs defined here and call exactly one function per
//! operation.

pub mod manager;
pub mod members;
pub mod shares;
pub mod unit_of_work;

pub use manager::{library_manager_info, member_collection};
pub use members::{
    MemberInvite, MemberLibrarySort, MemberRoleModify, MemberStatusModify,
    MemberUninvite, invite_members, modify_member_role, modify_member_status,
    sort_member_library, uninvite_member,
};
pub use shares::{ShareStatusModify, list_shares, modify_share_status, remove_share};
pub use unit_of_work::LibraryUnitOfWork;
