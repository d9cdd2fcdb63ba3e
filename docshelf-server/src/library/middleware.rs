//! Library access middleware
//!
//! Resolves the library addressed by the request path and the caller's
//! standing in it. Handlers behind these layers receive a [`LibraryContext`]
//! and only need to run the operate check for mutating actions.

use axum::{
    Extension,
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use docshelf_core::{
    Library, LibraryID, LibraryMember, LibraryShare, LibraryShareID, MemberStatus, UserID,
    database::ports::{libraries::LibraryRepository, shares::LibrarySharesRepository},
    operate::{OperateCode, OperateContext, OperateError, check_operate},
};
use tracing::debug;

use crate::auth::Caller;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Caller, library and the caller's membership row (the owner may have none).
#[derive(Debug, Clone)]
pub struct LibraryContext {
    pub caller: UserID,
    pub library: Library,
    pub membership: Option<LibraryMember>,
}

impl LibraryContext {
    pub fn operate_context(&self) -> OperateContext {
        OperateContext::new(self.caller, self.library.uid, self.membership.as_ref())
    }

    /// Run the operate check for `code`, logging refusals.
    pub fn ensure_operate(&self, code: OperateCode) -> Result<(), OperateError> {
        check_operate(code, &self.operate_context()).inspect_err(|err| {
            debug!(
                library_id = %self.library.id,
                caller = %self.caller,
                operate = %code,
                error = %err,
                "library operation refused"
            );
        })
    }
}

/// The share addressed by `/library-shares/{library_share_id}`.
#[derive(Debug, Clone)]
pub struct ShareContext {
    pub share: LibraryShare,
}

pub async fn library_auth_middleware(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(library_id): Path<i64>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let context = resolve_library(&state, caller, LibraryID(library_id)).await?;
    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

pub async fn library_share_auth_middleware(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(library_share_id): Path<i64>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let share = state
        .unit_of_work()
        .shares
        .get_share(LibraryShareID(library_share_id))
        .await?
        .ok_or_else(|| AppError::not_found("library share not found"))?;

    let context = resolve_library(&state, caller, share.library_id).await?;
    request.extensions_mut().insert(context);
    request.extensions_mut().insert(ShareContext { share });
    Ok(next.run(request).await)
}

async fn resolve_library(
    state: &AppState,
    caller: UserID,
    library_id: LibraryID,
) -> AppResult<LibraryContext> {
    let libraries = &state.unit_of_work().libraries;

    let library = libraries
        .get_library(library_id)
        .await?
        .ok_or_else(|| AppError::not_found("library not found"))?;

    let membership = libraries.get_member(library_id, caller).await?;

    if !may_access(&library, caller, membership.as_ref()) {
        debug!(library_id = %library_id, caller = %caller, "library access refused");
        return Err(AppError::forbidden("no access to this library"));
    }

    Ok(LibraryContext {
        caller,
        library,
        membership,
    })
}

/// Owners always pass; other callers need a membership row that is not
/// disabled. Pending members keep read access.
fn may_access(library: &Library, caller: UserID, membership: Option<&LibraryMember>) -> bool {
    if library.is_owned_by(caller) {
        return true;
    }
    membership.is_some_and(|member| member.member_status() != Some(MemberStatus::Disabled))
}
