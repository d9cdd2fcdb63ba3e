//! Library operate permissions
//!
//! Every mutating library-management endpoint names an [`OperateCode`] and
//! checks it against the caller's standing in the library before any logic
//! runs. The table is fixed: it maps each code to the roles allowed to
//! perform it.
//!
//! ## Rules
//!
//! - The library owner may perform every operation, with or without a
//!   membership row.
//! - Anyone else needs a membership row whose status is
//!   [`MemberStatus::Normal`].
//! - Member and share management needs [`LibraryRole::Owner`] or
//!   [`LibraryRole::Admin`]; changing roles needs [`LibraryRole::Owner`].
//!
//! ## Example
//!
//! ```
//! use docshelf_core::operate::{OperateCode, OperateContext, check_operate};
//! use docshelf_core::{LibraryRole, MemberStatus, UserID};
//!
//! let ctx = OperateContext {
//!     caller: UserID(7),
//!     library_owner: UserID(1),
//!     membership: Some((LibraryRole::Admin.code(), MemberStatus::Normal.code())),
//! };
//! assert!(check_operate(OperateCode::LibraryMemberInvite, &ctx).is_ok());
//! assert!(check_operate(OperateCode::LibraryMemberRoleModify, &ctx).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{LibraryMember, LibraryRole, MemberStatus, UserID};

/// Identifies which permission rule applies to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperateCode {
    LibraryMemberInvite,
    LibraryMemberRemove,
    LibraryMemberStatusModify,
    LibraryMemberRoleModify,
    LibraryShareStatusModify,
    LibraryShareRemove,
}

impl OperateCode {
    /// Whether a non-owner member holding `role` may perform the operation.
    pub fn permits(self, role: LibraryRole) -> bool {
        match self {
            OperateCode::LibraryMemberInvite
            | OperateCode::LibraryMemberRemove
            | OperateCode::LibraryMemberStatusModify
            | OperateCode::LibraryShareStatusModify
            | OperateCode::LibraryShareRemove => role.is_manager(),
            OperateCode::LibraryMemberRoleModify => role == LibraryRole::Owner,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperateCode::LibraryMemberInvite => "library_member:invite",
            OperateCode::LibraryMemberRemove => "library_member:remove",
            OperateCode::LibraryMemberStatusModify => "library_member:status_modify",
            OperateCode::LibraryMemberRoleModify => "library_member:role_modify",
            OperateCode::LibraryShareStatusModify => "library_share:status_modify",
            OperateCode::LibraryShareRemove => "library_share:remove",
        }
    }
}

impl std::fmt::Display for OperateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller standing in one library, passed explicitly to [`check_operate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperateContext {
    pub caller: UserID,
    pub library_owner: UserID,
    /// Raw role and status codes of the caller's membership row, if any.
    pub membership: Option<(i32, i32)>,
}

impl OperateContext {
    pub fn new(caller: UserID, library_owner: UserID, member: Option<&LibraryMember>) -> Self {
        Self {
            caller,
            library_owner,
            membership: member.map(|m| (m.urole, m.status)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperateError {
    #[error("caller is not a member of the library")]
    NotMember,

    #[error("caller membership is not active")]
    Inactive,

    #[error("operation {0} requires a higher library role")]
    Forbidden(OperateCode),
}

/// Check whether the caller described by `ctx` may perform `code`.
pub fn check_operate(code: OperateCode, ctx: &OperateContext) -> Result<(), OperateError> {
    if ctx.caller == ctx.library_owner {
        return Ok(());
    }

    let (role, status) = ctx.membership.ok_or(OperateError::NotMember)?;

    if status != MemberStatus::Normal.code() {
        return Err(OperateError::Inactive);
    }

    // Unknown role codes grant nothing.
    match LibraryRole::from_code(role) {
        Some(role) if code.permits(role) => Ok(()),
        _ => Err(OperateError::Forbidden(code)),
    }
}
