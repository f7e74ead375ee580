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

//! API error types.
//!
//! Every failed API response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"CASE_NOT_FOUND"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail (I/O errors, upstream
/// bodies) that is useful during development but should be redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"INVALID_CASE_ID"`, `"CASE_NOT_FOUND"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    pub fn invalid_request_body(detail: &str) -> Self {
        Self {
            code: "INVALID_REQUEST_BODY".to_string(),
            message: "Request body must be a JSON object with the expected fields.".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }

    pub fn missing_meeting_id() -> Self {
        Self {
            code: "MISSING_MEETING_ID".to_string(),
            message: "meetingId is required.".to_string(),
            engineering_error: None,
        }
    }

    pub fn invalid_case_id(detail: &str) -> Self {
        Self {
            code: "INVALID_CASE_ID".to_string(),
            message: format!("Invalid caseId: {detail}"),
            engineering_error: None,
        }
    }

    pub fn missing_evidence() -> Self {
        Self {
            code: "MISSING_EVIDENCE".to_string(),
            message: "evidence is required and must be an object.".to_string(),
            engineering_error: None,
        }
    }

    pub fn case_not_found(case_id: &str) -> Self {
        Self {
            code: "CASE_NOT_FOUND".to_string(),
            message: format!("Case '{case_id}' not found"),
            engineering_error: None,
        }
    }

    pub fn missing_token() -> Self {
        Self {
            code: "MISSING_TOKEN".to_string(),
            message: "Missing token".to_string(),
            engineering_error: None,
        }
    }

    pub fn videosdk_not_configured() -> Self {
        Self {
            code: "VIDEOSDK_NOT_CONFIGURED".to_string(),
            message: "Missing VIDEOSDK_API_KEY / VIDEOSDK_SECRET".to_string(),
            engineering_error: None,
        }
    }

    pub fn upstream_error(detail: &str) -> Self {
        Self {
            code: "UPSTREAM_ERROR".to_string(),
            message: "Video provider request failed".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }

    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "Internal server error".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
