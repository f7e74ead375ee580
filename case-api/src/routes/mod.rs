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

//! Axum router configuration for the case API.

pub mod cases;
pub mod videosdk;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Build the full application router with all case API routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health))
        // Cases
        .route("/api/case/start", post(cases::start_case))
        .route("/api/case/evidence", post(cases::submit_evidence))
        // VideoSDK
        .route("/api/videosdk/token", get(videosdk::issue_token))
        .route("/api/videosdk/room", post(videosdk::create_room))
}

async fn health() -> &'static str {
    "ok"
}
