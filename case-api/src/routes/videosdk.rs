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

//! VideoSDK token issuing and room-creation proxy.

use axum::{extract::State, http::StatusCode, Json};
use meeting_evidence_types::{
    requests::CreateRoomRequest,
    responses::{APIResponse, VideoSdkTokenResponse},
};
use serde_json::Value;

use crate::error::{AppError, AppJson};
use crate::state::AppState;
use crate::token::generate_videosdk_token;

/// GET /api/videosdk/token
pub async fn issue_token(
    State(state): State<AppState>,
) -> Result<Json<APIResponse<VideoSdkTokenResponse>>, AppError> {
    let videosdk = state
        .videosdk
        .as_ref()
        .ok_or_else(AppError::videosdk_not_configured)?;

    let token = generate_videosdk_token(&videosdk.api_key, &videosdk.secret, state.token_ttl_secs)?;
    Ok(Json(APIResponse::ok(VideoSdkTokenResponse { token })))
}

/// POST /api/videosdk/room
///
/// Forwards to `POST {videosdk_api_url}/v2/rooms` with the caller's token and
/// relays the upstream status and JSON body unchanged.
pub async fn create_room(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let token = body
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::missing_token)?;

    let url = format!("{}/v2/rooms", state.videosdk_api_url);
    let response = state
        .http
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, token)
        .json(&serde_json::json!({}))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("VideoSDK room request failed: {e}");
            AppError::upstream(&e.to_string())
        })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| AppError::upstream(&e.to_string()))?;
    let payload: Value = response.json().await.map_err(|e| {
        tracing::error!("VideoSDK room response was not JSON: {e}");
        AppError::upstream(&e.to_string())
    })?;

    Ok((status, Json(payload)))
}
