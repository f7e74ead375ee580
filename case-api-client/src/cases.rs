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

//! Case endpoints: start a case, submit evidence, and the combined flow.

use evidence_collector::{collect, CollectOptions, EvidenceRecord, Platform};
use meeting_evidence_types::{
    requests::StartCaseRequest,
    responses::{StartCaseResponse, SubmitEvidenceResponse},
};
use serde_json::json;

use crate::error::ApiError;
use crate::{parse_api_response, CaseApiClient};

impl CaseApiClient {
    /// Open a case for a participant about to create or join a meeting.
    ///
    /// Calls `POST /api/case/start`. Returns the new case id.
    pub async fn start_case(&self, request: &StartCaseRequest) -> Result<String, ApiError> {
        let response = self.post("/api/case/start").json(request).send().await?;
        let started: StartCaseResponse = parse_api_response(response).await?;
        log::debug!("case {} started", started.case_id);
        Ok(started.case_id)
    }

    /// Append an evidence record to a case.
    ///
    /// Calls `POST /api/case/evidence`.
    pub async fn submit_evidence(
        &self,
        case_id: &str,
        evidence: &EvidenceRecord,
    ) -> Result<(), ApiError> {
        let body = json!({ "caseId": case_id, "evidence": evidence });
        let response = self.post("/api/case/evidence").json(&body).send().await?;
        let ack: SubmitEvidenceResponse = parse_api_response(response).await?;
        if !ack.ok {
            return Err(ApiError::ServerError {
                status: 200,
                body: "evidence was not acknowledged".to_string(),
            });
        }
        Ok(())
    }

    /// Start a case, collect evidence from `platform`, and submit it.
    ///
    /// This is what the joining screen runs before entering a meeting. The
    /// case is opened first so that a collection failure (only possible with
    /// `require_geo`) still leaves the server-side evidence behind.
    pub async fn collect_and_submit<P>(
        &self,
        platform: &P,
        request: &StartCaseRequest,
        options: CollectOptions,
    ) -> Result<String, ApiError>
    where
        P: Platform + ?Sized,
    {
        let case_id = self.start_case(request).await?;
        let record = collect(platform, options).await.map_err(|e| {
            log::warn!("evidence collection for case {case_id} failed: {e}");
            e
        })?;
        self.submit_evidence(&case_id, &record).await?;
        Ok(case_id)
    }
}
