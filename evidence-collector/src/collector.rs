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

//! The evidence collection routine.
//!
//! Probes run in a fixed shape:
//!
//! 1. identity/environment (sync)
//! 2. screen and viewport (sync)
//! 3. permissions and 4. geolocation, concurrently
//!
//! Each probe owns a disjoint set of fields, so the concurrent pair never
//! touches shared state. Only the geolocation probe is time-bounded.

use std::time::Duration;

use chrono::SecondsFormat;
use futures::future::{self, Either};
use log::debug;
use meeting_evidence_types::evidence::{
    EvidenceRecord, GeoError, GeoEvidence, PermissionState, PermissionsEvidence, ScreenEvidence,
    ViewportEvidence,
};

use crate::error::{CollectError, ProbeError};
use crate::platform::{PermissionName, Platform, PositionOptions};

/// Default upper bound on waiting for a geolocation fix.
pub const DEFAULT_GEO_TIMEOUT: Duration = Duration::from_millis(8000);

/// Options for [`collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Fail with [`CollectError::GeolocationRequired`] unless a fix is obtained.
    pub require_geo: bool,
    /// Upper bound on the geolocation probe.
    pub geo_timeout: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            require_geo: false,
            geo_timeout: DEFAULT_GEO_TIMEOUT,
        }
    }
}

impl CollectOptions {
    pub fn require_geo(mut self, require_geo: bool) -> Self {
        self.require_geo = require_geo;
        self
    }

    pub fn geo_timeout(mut self, geo_timeout: Duration) -> Self {
        self.geo_timeout = geo_timeout;
        self
    }
}

/// Collect one [`EvidenceRecord`] from `platform`.
///
/// Never fails unless `options.require_geo` is set and the geolocation probe
/// did not produce a fix, in which case all probes still run to completion
/// before [`CollectError::GeolocationRequired`] is returned.
pub async fn collect<P>(platform: &P, options: CollectOptions) -> Result<EvidenceRecord, CollectError>
where
    P: Platform + ?Sized,
{
    let captured_at = platform
        .now()
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    let identity = probe_identity(platform);
    let screen = probe_screen(platform);
    let viewport = probe_viewport(platform);

    let (permissions, geo) = future::join(
        probe_permissions(platform),
        probe_geolocation(platform, options.geo_timeout),
    )
    .await;

    if options.require_geo && !geo.allowed {
        return Err(CollectError::GeolocationRequired { reason: geo.error });
    }

    Ok(EvidenceRecord {
        captured_at,
        user_agent: identity.user_agent,
        language: identity.language,
        platform: identity.platform,
        timezone: identity.timezone,
        timezone_offset_minutes: identity.timezone_offset_minutes,
        screen,
        viewport,
        permissions,
        geo,
    })
}

struct Identity {
    user_agent: Option<String>,
    language: Option<String>,
    platform: Option<String>,
    timezone: Option<String>,
    timezone_offset_minutes: Option<i32>,
}

/// Collapse a probe result to `Option`, dropping empty strings.
fn text(field: &str, result: Result<String, ProbeError>) -> Option<String> {
    match result {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(err) => {
            debug!("evidence: {field} unavailable: {err}");
            None
        }
    }
}

fn probe_identity<P: Platform + ?Sized>(platform: &P) -> Identity {
    let language = text("language", platform.language()).or_else(|| {
        platform
            .languages()
            .ok()
            .and_then(|langs| langs.into_iter().find(|l| !l.is_empty()))
    });

    let timezone_offset_minutes = match platform.timezone_offset_minutes() {
        Ok(offset) => Some(offset),
        Err(err) => {
            debug!("evidence: timezone offset unavailable: {err}");
            None
        }
    };

    Identity {
        user_agent: text("user agent", platform.user_agent()),
        language,
        platform: text("platform", platform.platform()),
        timezone: text("timezone", platform.timezone()),
        timezone_offset_minutes,
    }
}

fn probe_screen<P: Platform + ?Sized>(platform: &P) -> ScreenEvidence {
    platform.screen().unwrap_or_else(|err| {
        debug!("evidence: screen unavailable: {err}");
        ScreenEvidence::default()
    })
}

fn probe_viewport<P: Platform + ?Sized>(platform: &P) -> ViewportEvidence {
    platform.viewport().unwrap_or_else(|err| {
        debug!("evidence: viewport unavailable: {err}");
        ViewportEvidence::default()
    })
}

async fn query_one<P: Platform + ?Sized>(platform: &P, name: PermissionName) -> PermissionState {
    match platform.query_permission(name).await {
        Ok(state) => state,
        Err(err) => {
            debug!("evidence: {} permission query failed: {err}", name.as_str());
            PermissionState::Unknown
        }
    }
}

async fn probe_permissions<P: Platform + ?Sized>(platform: &P) -> PermissionsEvidence {
    if !platform.supports_permission_query() {
        return PermissionsEvidence::unsupported();
    }

    let (camera, microphone, geolocation) = future::join3(
        query_one(platform, PermissionName::Camera),
        query_one(platform, PermissionName::Microphone),
        query_one(platform, PermissionName::Geolocation),
    )
    .await;

    PermissionsEvidence {
        supported: true,
        camera,
        microphone,
        geolocation,
    }
}

async fn probe_geolocation<P: Platform + ?Sized>(platform: &P, timeout: Duration) -> GeoEvidence {
    if !platform.supports_geolocation() {
        return GeoEvidence::unsupported();
    }

    let options = PositionOptions::fresh(timeout);
    let fix = platform.current_position(&options);
    let deadline = platform.sleep(timeout);

    let evidence = match future::select(fix, deadline).await {
        Either::Left((Ok(coords), _)) => GeoEvidence::allowed(coords),
        Either::Left((Err(err), _)) => {
            debug!("evidence: geolocation refused: {err}");
            GeoEvidence::refused(err)
        }
        Either::Right(((), _)) => {
            debug!("evidence: geolocation timed out after {timeout:?}");
            GeoEvidence::refused(GeoError::timeout())
        }
    };
    evidence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_do_not_require_geo() {
        let options = CollectOptions::default();
        assert!(!options.require_geo);
        assert_eq!(options.geo_timeout, Duration::from_millis(8000));
    }

    #[test]
    fn builder_overrides_options() {
        let options = CollectOptions::default()
            .require_geo(true)
            .geo_timeout(Duration::from_secs(2));
        assert!(options.require_geo);
        assert_eq!(options.geo_timeout, Duration::from_secs(2));
    }

    #[test]
    fn empty_text_is_treated_as_missing() {
        assert_eq!(text("x", Ok(String::new())), None);
        assert_eq!(text("x", Err(ProbeError::Unsupported)), None);
        assert_eq!(text("x", Ok("v".to_string())).as_deref(), Some("v"));
    }
}
