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

//! Error types for evidence collection.

use meeting_evidence_types::GeoError;
use thiserror::Error;

/// Failure of a single platform read.
///
/// Never escapes [`crate::collect`]: the collector turns it into a `None` or
/// `"unknown"` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The capability does not exist on this platform.
    #[error("not supported on this platform")]
    Unsupported,

    /// The capability exists but the call failed.
    #[error("probe failed: {0}")]
    Failed(String),
}

/// Errors returned by [`crate::collect`].
#[derive(Debug, Clone, Error)]
pub enum CollectError {
    /// The caller required a geolocation fix and none was obtained.
    #[error("geolocation is required to continue (denied or unavailable){}", describe(.reason))]
    GeolocationRequired {
        /// Error reported by the geolocation probe, `None` when the platform
        /// has no geolocation support at all.
        reason: Option<GeoError>,
    },
}

fn describe(reason: &Option<GeoError>) -> String {
    match reason {
        Some(err) => format!(": {err}"),
        None => String::new(),
    }
}
