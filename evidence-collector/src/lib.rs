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

//! Best-effort evidence collection for meeting participants.
//!
//! [`collect`] gathers user agent, language, timezone, display geometry,
//! camera/microphone/geolocation permission states and an optional
//! geolocation fix into one [`EvidenceRecord`]. Every probe is isolated: a
//! probe that fails degrades its own fields to `None` or
//! [`PermissionState::Unknown`] and never aborts its siblings.
//!
//! The environment is reached only through the [`Platform`] trait, so the
//! same collector runs in the browser ([`platform::WebPlatform`], feature
//! `wasm`), on desktop ([`platform::NativePlatform`], feature `native`) and
//! against scripted fakes in tests.
//!
//! # Example
//!
//! ```no_run
//! use evidence_collector::{collect, CollectOptions};
//! use evidence_collector::platform::NativePlatform;
//!
//! # async fn example() -> Result<(), evidence_collector::CollectError> {
//! let platform = NativePlatform::from_env();
//! let record = collect(&platform, CollectOptions::default()).await?;
//! println!("captured at {}", record.captured_at);
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod error;
pub mod platform;

pub use collector::{collect, CollectOptions, DEFAULT_GEO_TIMEOUT};
pub use error::{CollectError, ProbeError};
pub use meeting_evidence_types::evidence::{
    Coordinates, EvidenceRecord, GeoError, GeoEvidence, PermissionState, PermissionsEvidence,
    ScreenEvidence, ViewportEvidence,
};
pub use platform::{PermissionName, Platform, PositionOptions};
