use axum::{
    Json,
    extract::{Query, rejection::JsonRejection, rejection::QueryRejection},
};
use docshelf_core::api_types::ValidationError;
use tracing::debug;

use crate::infra::errors::AppError;

/// Unwrap a JSON body, reporting malformed payloads as parameter errors
/// inside the response envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(error = %rejection, "request body rejected");
        ValidationError::InvalidParameters.into()
    })
}

pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params.map(|Query(params)| params).map_err(|rejection| {
        debug!(error = %rejection, "query string rejected");
        ValidationError::InvalidParameters.into()
    })
}
