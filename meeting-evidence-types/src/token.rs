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

//! VideoSDK access token (JWT) claims.
//!
//! The case API signs this token with the VideoSDK secret; the browser hands it
//! to the meeting SDK and to the room-creation proxy.

use serde::{Deserialize, Serialize};

/// JWT payload accepted by the VideoSDK REST and realtime APIs.
///
/// # Example payload
///
/// ```json
/// {
///   "apikey": "b3f1...",
///   "permissions": ["allow_join"],
///   "iat": 1707004200,
///   "exp": 1707004800
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoSdkTokenClaims {
    /// VideoSDK API key the token is issued for.
    pub apikey: String,

    /// Granted permissions. The server only ever grants [`Self::ALLOW_JOIN`].
    pub permissions: Vec<String>,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

impl VideoSdkTokenClaims {
    /// Permission that lets a participant join a room directly.
    pub const ALLOW_JOIN: &'static str = "allow_join";
}
