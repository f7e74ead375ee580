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

//! Shared types for the meeting evidence service.
//!
//! This crate defines the contract between the evidence collector, the
//! case API server and its clients. It is intentionally framework-agnostic:
//! no axum, no browser bindings, no filesystem access.

pub mod case;
pub mod error;
pub mod evidence;
pub mod requests;
pub mod responses;
pub mod token;

pub use case::{CaseFile, ClientEvidenceEntry, ServerEvidence};
pub use error::APIError;
pub use evidence::{
    Coordinates, EvidenceRecord, GeoError, GeoEvidence, PermissionState, PermissionsEvidence,
    ScreenEvidence, ViewportEvidence,
};
pub use responses::APIResponse;
pub use token::VideoSdkTokenClaims;
