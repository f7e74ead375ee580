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

//! Cross-platform REST client for the case evidence API.
//!
//! Works on WASM (browser), desktop, and mobile targets via [`reqwest`].
//!
//! # Example
//!
//! ```no_run
//! use case_api_client::CaseApiClient;
//! use evidence_collector::{platform::NativePlatform, CollectOptions};
//! use meeting_evidence_types::requests::StartCaseRequest;
//!
//! # async fn example() -> Result<(), case_api_client::ApiError> {
//! let client = CaseApiClient::new("http://localhost:3000");
//! let request = StartCaseRequest {
//!     meeting_id: Some("abcd-efgh-ijkl".to_string()),
//!     participant_name: Some("Ana".to_string()),
//!     ..Default::default()
//! };
//!
//! let case_id = client
//!     .collect_and_submit(&NativePlatform::from_env(), &request, CollectOptions::default())
//!     .await?;
//! println!("evidence stored in case {case_id}");
//! # Ok(())
//! # }
//! ```

pub mod cases;
pub mod error;
pub mod videosdk;

pub use error::ApiError;
pub use meeting_evidence_types;

use meeting_evidence_types::{APIError, APIResponse};
use reqwest::Client;

/// A typed REST client for the case evidence API.
///
/// All methods return strongly-typed responses from
/// [`meeting_evidence_types`] and map HTTP errors to [`ApiError`].
#[derive(Debug, Clone)]
pub struct CaseApiClient {
    base_url: String,
    http: Client,
}

impl CaseApiClient {
    /// Create a new client pointing at the given case API base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `"http://localhost:3000"`; in the browser an
    ///   absolute origin is required by `fetch`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Build a GET request.
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    /// Build a POST request.
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Human-readable message from an error body, falling back to the raw text.
fn error_message(text: String) -> String {
    serde_json::from_str::<APIResponse<APIError>>(&text)
        .map(|r| r.result.to_string())
        .unwrap_or(text)
}

/// Map a non-success status to [`ApiError`].
pub(crate) async fn error_for_status(status: u16, response: reqwest::Response) -> ApiError {
    let text = response.text().await.unwrap_or_default();
    match status {
        400 => ApiError::BadRequest(error_message(text)),
        404 => ApiError::NotFound(error_message(text)),
        _ => ApiError::ServerError { status, body: text },
    }
}

/// Parse a standard `APIResponse<T>` body, returning `T` on success or
/// mapping the error to [`ApiError`].
pub(crate) async fn parse_api_response<T: serde::de::DeserializeOwned + serde::Serialize>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    match status {
        200 | 201 => {
            let wrapper: APIResponse<T> = response.json().await?;
            Ok(wrapper.result)
        }
        _ => Err(error_for_status(status, response).await),
    }
}
