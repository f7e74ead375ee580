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

//! Handlers for case start and evidence submission.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use meeting_evidence_types::{
    requests::{StartCaseRequest, SubmitEvidenceRequest},
    responses::{APIResponse, StartCaseResponse, SubmitEvidenceResponse},
    ServerEvidence,
};
use uuid::Uuid;

use crate::error::{AppError, AppJson};
use crate::request_meta::RequestMeta;
use crate::state::AppState;

const CREATOR_ROLE: &str = "creator";

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `mode` defaults from `role`: the creator creates, everyone else joins.
fn resolve_mode(mode: Option<String>, role: Option<&str>) -> String {
    non_empty(mode).unwrap_or_else(|| {
        if role == Some(CREATOR_ROLE) {
            "create".to_string()
        } else {
            "join".to_string()
        }
    })
}

/// POST /api/case/start
pub async fn start_case(
    State(state): State<AppState>,
    meta: RequestMeta,
    AppJson(body): AppJson<StartCaseRequest>,
) -> Result<Json<APIResponse<StartCaseResponse>>, AppError> {
    let meeting_id = non_empty(body.meeting_id).ok_or_else(AppError::missing_meeting_id)?;
    let role = non_empty(body.role);
    let mode = resolve_mode(body.mode, role.as_deref());
    let case_id = Uuid::new_v4().to_string();

    let server_evidence = ServerEvidence {
        case_id: case_id.clone(),
        meeting_id,
        mode,
        role,
        participant_name: non_empty(body.participant_name),
        created_at: now_iso(),
        ip: meta.ip,
        user_agent: meta.user_agent,
        accept_language: meta.accept_language,
        host: meta.host,
    };

    let case = state.store.create(server_evidence).await?;
    tracing::info!(
        case_id = %case.server_evidence.case_id,
        meeting_id = %case.server_evidence.meeting_id,
        mode = %case.server_evidence.mode,
        "Case started"
    );

    Ok(Json(APIResponse::ok(StartCaseResponse { case_id })))
}

/// POST /api/case/evidence
pub async fn submit_evidence(
    State(state): State<AppState>,
    AppJson(body): AppJson<SubmitEvidenceRequest>,
) -> Result<Json<APIResponse<SubmitEvidenceResponse>>, AppError> {
    let case_id =
        non_empty(body.case_id).ok_or_else(|| AppError::invalid_case_id("caseId is required"))?;
    let evidence = body
        .evidence
        .filter(|e| e.is_object())
        .ok_or_else(AppError::missing_evidence)?;

    let count = state.store.append(&case_id, evidence, now_iso()).await?;
    tracing::info!(case_id = %case_id, entries = count, "Client evidence appended");

    Ok(Json(APIResponse::ok(SubmitEvidenceResponse { ok: true })))
}
