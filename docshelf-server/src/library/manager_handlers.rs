//! Read-side library endpoints plus the caller's own library placement.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use docshelf_core::{
    LibraryMemberSummary,
    api_types::{ApiResponse, LibraryManagerInfo, MemberLibrarySortRequest},
    application,
};

use super::extract::json_body;
use super::middleware::LibraryContext;
use crate::infra::{app_state::AppState, errors::AppResult};

/// Library record plus the caller's membership (`null` for an owner without
/// a membership row).
pub async fn library_manager_info_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
) -> AppResult<Json<ApiResponse<LibraryManagerInfo>>> {
    let info = application::library_manager_info(
        state.unit_of_work().libraries.as_ref(),
        &ctx.library,
        ctx.caller,
    )
    .await?;

    Ok(Json(ApiResponse::success(info)))
}

/// Move the library into one of the caller's groups.
pub async fn member_library_sort_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    payload: Result<Json<MemberLibrarySortRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let sort = json_body(payload)?.validate(ctx.library.id, ctx.caller)?;

    let uow = state.unit_of_work();
    application::sort_member_library(uow.libraries.as_ref(), uow.members.as_ref(), sort).await?;

    Ok(Json(ApiResponse::message("library sorted")))
}

pub async fn member_collection_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
) -> AppResult<Json<ApiResponse<Vec<LibraryMemberSummary>>>> {
    let members =
        application::member_collection(state.unit_of_work().members.as_ref(), ctx.library.id)
            .await?;

    Ok(Json(ApiResponse::success(members)))
}
