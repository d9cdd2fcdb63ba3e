use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use docshelf_core::{
    LibraryShare,
    api_types::{ApiResponse, ShareStatusModifyRequest},
    application,
    operate::OperateCode,
    query::{Page, PageParams, Pagination, ShareListFilter},
};

use super::extract::{json_body, query_params};
use super::middleware::{LibraryContext, ShareContext};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Paginated share links of a library. Filters and paging share one query
/// string.
pub async fn library_share_list_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    filter: Result<Query<ShareListFilter>, QueryRejection>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Page<LibraryShare>>>> {
    let filter = query_params(filter)?;
    let pagination = Pagination::from_params(&query_params(page)?, state.config().default_page_size);

    let page = application::list_shares(
        state.unit_of_work().shares.as_ref(),
        ctx.library.id,
        &filter,
        &pagination,
    )
    .await?;

    Ok(Json(ApiResponse::success(page)))
}

pub async fn library_share_status_modify_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    Extension(share): Extension<ShareContext>,
    payload: Result<Json<ShareStatusModifyRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryShareStatusModify)?;
    let modify = json_body(payload)?.validate(share.share.id)?;

    let modified =
        application::modify_share_status(state.unit_of_work().shares.as_ref(), modify).await?;
    if !modified {
        return Err(AppError::bad_request("modify failed"));
    }

    Ok(Json(ApiResponse::message("share status modified")))
}

pub async fn library_share_remove_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<LibraryContext>,
    Extension(share): Extension<ShareContext>,
) -> AppResult<Json<ApiResponse<()>>> {
    ctx.ensure_operate(OperateCode::LibraryShareRemove)?;

    application::remove_share(state.unit_of_work().shares.as_ref(), share.share.id).await?;

    Ok(Json(ApiResponse::message("share removed")))
}
