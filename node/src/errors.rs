// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clipmark::StoreError;
use thiserror::Error;

use crate::api::ErrorBody;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // I/O failures carry no detail to the client, only to the log.
            ApiError::Store(StoreError::Io(e)) => {
                tracing::error!("Marker file I/O failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Store(StoreError::InvalidPayload(msg)) => {
                tracing::warn!("Rejected save: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { error: msg })).into_response()
            }
        }
    }
}
