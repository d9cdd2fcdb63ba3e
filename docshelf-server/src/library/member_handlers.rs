//! Member management endpoints
//!
//! Every handler runs the operate check before reading its body, so callers
//! without the role get 403 whatever they send.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use docshelf_core::{
    api_types::{
        ApiResponse, MemberInviteRequest, MemberRoleModifyRequest, MemberStatusModifyRequest,
        MemberUninviteRequest,
    },
    application,
    operate::OperateCode,
};

use super::extract::json_body;
use super::middleware::LibraryContext;
use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn member_invite_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    payload: Result<Json<MemberInviteRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryMemberInvite)?;
    let invite = json_body(payload)?.validate(ctx.library.id)?;

    application::invite_members(state.unit_of_work().members.as_ref(), &ctx.library, invite)
        .await?;

    Ok(Json(ApiResponse::message("members invited")))
}

pub async fn member_uninvite_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    payload: Result<Json<MemberUninviteRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryMemberRemove)?;
    let uninvite = json_body(payload)?.validate(ctx.library.id)?;

    application::uninvite_member(state.unit_of_work().members.as_ref(), &ctx.library, uninvite)
        .await?;

    Ok(Json(ApiResponse::message("member removed")))
}

pub async fn member_status_modify_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    payload: Result<Json<MemberStatusModifyRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryMemberStatusModify)?;
    let modify = json_body(payload)?.validate(ctx.library.id)?;

    application::modify_member_status(state.unit_of_work().members.as_ref(), &ctx.library, modify)
        .await?;

    Ok(Json(ApiResponse::message("member status modified")))
}

pub async fn member_role_modify_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    payload: Result<Json<MemberRoleModifyRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryMemberRoleModify)?;
    let modify = json_body(payload)?.validate(ctx.library.id)?;

    application::modify_member_role(state.unit_of_work().members.as_ref(), &ctx.library, modify)
        .await?;

    Ok(Json(ApiResponse::message("member role modified")))
}
