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

//! VideoSDK access token generation.
//!
//! The browser never sees the VideoSDK secret: it asks this service for a
//! short-lived HS256 token that only grants `allow_join`.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use meeting_evidence_types::VideoSdkTokenClaims;

use crate::error::AppError;

/// Sign a VideoSDK token for `api_key` valid for `ttl_secs`.
pub fn generate_videosdk_token(
    api_key: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = VideoSdkTokenClaims {
        apikey: api_key.to_string(),
        permissions: vec![VideoSdkTokenClaims::ALLOW_JOIN.to_string()],
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign VideoSDK JWT: {e}");
        AppError::internal("failed to generate VideoSDK token")
    })
}
