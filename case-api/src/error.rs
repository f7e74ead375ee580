/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meeting_evidence_types::{APIError, APIResponse};

use crate::storage::StoreError;

/// `Json` extractor whose rejections are reported as [`AppError`], so a body
/// that fails to parse gets a 400 in the usual envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn invalid_request_body(detail: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            APIError::invalid_request_body(detail),
        )
    }

    pub fn missing_meeting_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_meeting_id())
    }

    pub fn invalid_case_id(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::invalid_case_id(detail))
    }

    pub fn missing_evidence() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_evidence())
    }

    pub fn case_not_found(case_id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, APIError::case_not_found(case_id))
    }

    pub fn missing_token() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_token())
    }

    pub fn videosdk_not_configured() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::videosdk_not_configured(),
        )
    }

    pub fn upstream(detail: &str) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, APIError::upstream_error(detail))
    }

    pub fn internal(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::internal_error(detail),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_request_body(&rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCaseId(detail) => Self::invalid_case_id(detail),
            StoreError::NotFound(case_id) => Self::case_not_found(&case_id),
            other => {
                tracing::error!("Case storage error: {other}");
                Self::internal(&other.to_string())
            }
        }
    }
}
