use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use docshelf_core::unix_now;

use crate::auth::Caller;
use crate::infra::{app_state::AppState, errors::AppError};

/// Verify the bearer token and attach the caller's identity to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| AppError::unauthorized("authentication required"))?;

    let claims = state.token_signer.verify(token, unix_now())?;

    request.extensions_mut().insert(Caller(claims.uid));

    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
