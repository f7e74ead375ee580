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

//! Platform abstraction for the evidence collector.
//!
//! [`Platform`] is the capability surface the collector reads from. It covers
//! the synchronous environment accessors, the permission query API, the
//! one-shot geolocation request and a timer.
//!
//! Two implementations ship with the crate, selected at compile time:
//!
//! - **`WebPlatform`** (`wasm32` + feature `wasm`): `navigator`, `window`,
//!   `Intl.DateTimeFormat`, `navigator.permissions`, `navigator.geolocation`.
//! - **`NativePlatform`** (feature `native`): locale and timezone from the
//!   process environment, no permissions, no geolocation.

#[cfg(feature = "native")]
mod native;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(feature = "native")]
pub use native::NativePlatform;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::WebPlatform;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meeting_evidence_types::evidence::{
    Coordinates, GeoError, PermissionState, ScreenEvidence, ViewportEvidence,
};

use crate::error::ProbeError;

/// Capabilities whose permission state is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionName {
    Camera,
    Microphone,
    Geolocation,
}

impl PermissionName {
    pub const ALL: [PermissionName; 3] = [
        PermissionName::Camera,
        PermissionName::Microphone,
        PermissionName::Geolocation,
    ];

    /// Name as accepted by `navigator.permissions.query({ name })`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionName::Camera => "camera",
            PermissionName::Microphone => "microphone",
            PermissionName::Geolocation => "geolocation",
        }
    }
}

/// Options for a one-shot position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// Platform-level timeout for the fix.
    pub timeout: Duration,
    /// Maximum age of a cached position; zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl PositionOptions {
    /// Low accuracy, no cached positions.
    pub fn fresh(timeout: Duration) -> Self {
        Self {
            enable_high_accuracy: false,
            timeout,
            maximum_age: Duration::ZERO,
        }
    }
}

/// The environment the collector probes.
///
/// Synchronous accessors return `Err` when the value cannot be read; the
/// collector maps that to `None`. Empty strings are treated as missing too.
///
/// The trait is `?Send` because browser futures are bound to the JS thread.
#[async_trait(?Send)]
pub trait Platform {
    fn user_agent(&self) -> Result<String, ProbeError>;

    /// Primary UI language as a BCP 47 tag.
    fn language(&self) -> Result<String, ProbeError>;

    /// Preferred languages, most preferred first. Used when
    /// [`Platform::language`] yields nothing.
    fn languages(&self) -> Result<Vec<String>, ProbeError> {
        Ok(Vec::new())
    }

    fn platform(&self) -> Result<String, ProbeError>;

    /// IANA timezone name.
    fn timezone(&self) -> Result<String, ProbeError>;

    /// Minutes to add to local time to get UTC.
    fn timezone_offset_minutes(&self) -> Result<i32, ProbeError>;

    fn screen(&self) -> Result<ScreenEvidence, ProbeError>;

    fn viewport(&self) -> Result<ViewportEvidence, ProbeError>;

    /// Whether a permission query API exists at all.
    fn supports_permission_query(&self) -> bool;

    async fn query_permission(&self, name: PermissionName) -> Result<PermissionState, ProbeError>;

    /// Whether a geolocation API exists at all.
    fn supports_geolocation(&self) -> bool;

    /// Request one position fix. Resolves exactly once, either with a fix or
    /// with the platform's error.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError>;

    /// Suspend for `duration`. Bounds the geolocation probe.
    async fn sleep(&self, duration: Duration);

    /// Wall clock used for `capturedAt`.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
