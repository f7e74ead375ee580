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

//! Error types for the case API client.

use evidence_collector::CollectError;
use thiserror::Error;

/// Errors returned by [`CaseApiClient`](crate::CaseApiClient) methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The case does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status, with the raw body.
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Evidence could not be collected (geolocation was required and missing).
    #[error("Evidence collection failed: {0}")]
    Evidence(#[from] CollectError),
}
