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

//! Shared application state passed to every Axum handler via `State`.

use crate::config::{Config, VideoSdkConfig};
use crate::storage::CaseStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-case evidence files.
    pub store: CaseStore,
    /// VideoSDK credentials. `None` makes the token endpoint fail with 500.
    pub videosdk: Option<VideoSdkConfig>,
    /// Base URL of the VideoSDK REST API (no trailing slash).
    pub videosdk_api_url: String,
    /// VideoSDK token time-to-live in seconds.
    pub token_ttl_secs: i64,
    /// Outbound HTTP client for the room-creation proxy.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: CaseStore::new(&config.cases_dir),
            videosdk: config.videosdk.clone(),
            videosdk_api_url: config.videosdk_api_url.clone(),
            token_ttl_secs: config.token_ttl_secs,
            http: reqwest::Client::new(),
        }
    }
}
