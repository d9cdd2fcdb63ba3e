use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    auth::middleware::auth_middleware,
    library::{
        manager_handlers::{
            library_manager_info_handler, member_collection_handler, member_library_sort_handler,
        },
        member_handlers::{
            member_invite_handler, member_role_modify_handler, member_status_modify_handler,
            member_uninvite_handler,
        },
        middleware::{library_auth_middleware, library_share_auth_middleware},
        share_handlers::{
            library_share_list_handler, library_share_remove_handler,
            library_share_status_modify_handler,
        },
    },
};

/// Route paths, relative to `/api/v1`.
pub mod paths {
    pub const LIBRARY_MANAGER: &str = "/libraries/{library_id}/manager";
    pub const LIBRARY_SORT: &str = "/libraries/{library_id}/sort";
    pub const LIBRARY_MEMBERS: &str = "/libraries/{library_id}/members";
    pub const LIBRARY_MEMBER_INVITE: &str = "/libraries/{library_id}/members/invite";
    pub const LIBRARY_MEMBER_UNINVITE: &str = "/libraries/{library_id}/members/uninvite";
    pub const LIBRARY_MEMBER_STATUS: &str = "/libraries/{library_id}/members/status";
    pub const LIBRARY_MEMBER_ROLE: &str = "/libraries/{library_id}/members/role";
    pub const LIBRARY_SHARES: &str = "/libraries/{library_id}/shares";
    pub const LIBRARY_SHARE: &str = "/library-shares/{library_share_id}";
    pub const LIBRARY_SHARE_STATUS: &str = "/library-shares/{library_share_id}/status";
}

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(create_library_routes(state.clone()))
        .merge(create_share_routes(state.clone()))
        // Authentication runs before the library layers resolve access.
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Routes addressed by library id
fn create_library_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(paths::LIBRARY_MANAGER, get(library_manager_info_handler))
        .route(paths::LIBRARY_SORT, put(member_library_sort_handler))
        .route(paths::LIBRARY_MEMBERS, get(member_collection_handler))
        .route(paths::LIBRARY_MEMBER_INVITE, post(member_invite_handler))
        .route(paths::LIBRARY_MEMBER_UNINVITE, post(member_uninvite_handler))
        .route(paths::LIBRARY_MEMBER_STATUS, put(member_status_modify_handler))
        .route(paths::LIBRARY_MEMBER_ROLE, put(member_role_modify_handler))
        .route(paths::LIBRARY_SHARES, get(library_share_list_handler))
        .route_layer(middleware::from_fn_with_state(state, library_auth_middleware))
}

/// Routes addressed by share id
fn create_share_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(paths::LIBRARY_SHARE, delete(library_share_remove_handler))
        .route(
            paths::LIBRARY_SHARE_STATUS,
            put(library_share_status_modify_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            library_share_auth_middleware,
        ))
}

/// Replace a `{param}` placeholder in one of [`paths`].
pub fn with_param(path: &str, param: &str, value: impl std::fmt::Display) -> String {
    path.replace(&format!("{{{param}}}"), &value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_path_parameters() {
        assert_eq!(
            with_param(paths::LIBRARY_MEMBER_INVITE, "library_id", 12),
            "/libraries/12/members/invite"
        );
        assert_eq!(
            with_param(paths::LIBRARY_SHARE_STATUS, "library_share_id", 4),
            "/library-shares/4/status"
        );
    }
}
