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

//! Request types for the case API.
//!
//! These types define the shape of request bodies. They are used by both the
//! server (for deserialization) and clients (for serialization).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier fields accept only JSON strings; any other type reads as absent
/// so the handler answers with its usual "required" error.
fn string_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Request body for `POST /api/case/start`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartCaseRequest {
    /// Meeting (room) the participant is creating or joining. Required.
    #[serde(default, deserialize_with = "string_id")]
    pub meeting_id: Option<String>,

    #[serde(default)]
    pub participant_name: Option<String>,

    /// `"creator"` for the participant who created the room.
    #[serde(default)]
    pub role: Option<String>,

    /// `"create"` or `"join"`. Derived from `role` when omitted.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Request body for `POST /api/case/evidence`.
///
/// `evidence` is raw JSON so the server can report a precise error when it is
/// missing or not an object. Older clients send the same payload under `data`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEvidenceRequest {
    #[serde(default, deserialize_with = "string_id")]
    pub case_id: Option<String>,

    #[serde(default, alias = "data")]
    pub evidence: Option<Value>,
}

/// Request body for `POST /api/videosdk/room`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateRoomRequest {
    #[serde(default, deserialize_with = "string_id")]
    pub token: Option<String>,
}
