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

//! VideoSDK helpers: token fetch and room creation.

use meeting_evidence_types::{requests::CreateRoomRequest, responses::VideoSdkTokenResponse};
use serde_json::Value;

use crate::error::ApiError;
use crate::{error_for_status, parse_api_response, CaseApiClient};

impl CaseApiClient {
    /// Fetch a short-lived VideoSDK token signed by the server.
    ///
    /// Calls `GET /api/videosdk/token`.
    pub async fn fetch_videosdk_token(&self) -> Result<String, ApiError> {
        let response = self.get("/api/videosdk/token").send().await?;
        let body: VideoSdkTokenResponse = parse_api_response(response).await?;
        Ok(body.token)
    }

    /// Create a VideoSDK room through the server's proxy.
    ///
    /// Calls `POST /api/videosdk/room`. Returns VideoSDK's JSON response
    /// (it carries `roomId`).
    pub async fn create_room(&self, token: &str) -> Result<Value, ApiError> {
        let request = CreateRoomRequest {
            token: Some(token.to_string()),
        };
        let response = self.post("/api/videosdk/room").json(&request).send().await?;
        let status = response.status().as_u16();
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(error_for_status(status, response).await)
        }
    }
}
