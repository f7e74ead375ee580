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

//! On-disk shape of a case file.
//!
//! A case is created when a participant starts creating or joining a meeting.
//! The server records what it can observe about the request in
//! [`ServerEvidence`]; every evidence submission from the client is appended
//! to `clientEvidence`.

use serde::{Deserialize, Serialize};

/// Contents of `<caseId>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub server_evidence: ServerEvidence,
    /// Append-only log of client submissions, oldest first.
    #[serde(default)]
    pub client_evidence: Vec<ClientEvidenceEntry>,
}

impl CaseFile {
    pub fn new(server_evidence: ServerEvidence) -> Self {
        Self {
            server_evidence,
            client_evidence: Vec::new(),
        }
    }
}

/// Request metadata captured by the server when the case starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEvidence {
    pub case_id: String,
    pub meeting_id: String,
    /// `"create"` or `"join"`.
    pub mode: String,
    pub role: Option<String>,
    pub participant_name: Option<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub host: Option<String>,
}

/// One client submission as stored in the case file.
///
/// `data` is kept as raw JSON: the server stores whatever object the client
/// sent, so older or newer collector versions never get rejected on shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEvidenceEntry {
    pub received_at: String,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_file_without_client_evidence_defaults_to_empty() {
        let raw = r#"{
            "serverEvidence": {
                "caseId": "c1", "meetingId": "m1", "mode": "join",
                "role": null, "participantName": null, "createdAt": "2025-01-01T00:00:00.000Z",
                "ip": null, "userAgent": null, "acceptLanguage": null, "host": null
            }
        }"#;
        let case: CaseFile = serde_json::from_str(raw).unwrap();
        assert_eq!(case.server_evidence.case_id, "c1");
        assert!(case.client_evidence.is_empty());
    }
}
