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

//! The evidence record produced by one collection call.
//!
//! Every field is best-effort: a probe that fails is represented in-band as
//! `None`, [`PermissionState::Unknown`] or `supported: false`. The JSON shape
//! uses camelCase keys so that records produced in the browser and records
//! read back from case files look identical.

use serde::{Deserialize, Serialize};

/// Snapshot of a participant's environment, permissions and location.
///
/// # Example
///
/// ```json
/// {
///   "capturedAt": "2025-03-01T12:00:00.000Z",
///   "userAgent": "Mozilla/5.0 ...",
///   "language": "pt-BR",
///   "platform": "MacIntel",
///   "timezone": "America/Sao_Paulo",
///   "timezoneOffsetMinutes": 180,
///   "screen": { "width": 1920, "height": 1080, "devicePixelRatio": 2.0 },
///   "viewport": { "innerWidth": 1280, "innerHeight": 720 },
///   "permissions": { "supported": true, "camera": "granted", "microphone": "prompt", "geolocation": "denied" },
///   "geo": { "supported": true, "allowed": false, "coords": null, "error": { "code": 1, "message": "User denied Geolocation" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    /// ISO 8601 UTC timestamp taken when collection started.
    pub captured_at: String,
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub platform: Option<String>,
    /// IANA timezone name (e.g. `"Europe/Lisbon"`).
    pub timezone: Option<String>,
    /// Minutes to add to local time to get UTC (positive west of Greenwich).
    pub timezone_offset_minutes: Option<i32>,
    pub screen: ScreenEvidence,
    pub viewport: ViewportEvidence,
    pub permissions: PermissionsEvidence,
    pub geo: GeoEvidence,
}

/// Display geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenEvidence {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub device_pixel_ratio: Option<f64>,
}

/// Browser viewport size. Keys mirror the DOM property names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportEvidence {
    pub inner_width: Option<u32>,
    pub inner_height: Option<u32>,
}

/// State reported by a permission query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
    #[default]
    Unknown,
}

impl PermissionState {
    /// Parse a permission state string as reported by the browser.
    ///
    /// Anything unrecognised maps to [`PermissionState::Unknown`].
    pub fn from_state_str(state: &str) -> Self {
        match state {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            "prompt" => Self::Prompt,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission states for the three capabilities a meeting cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsEvidence {
    /// `false` when the permission query API itself is unavailable.
    pub supported: bool,
    pub camera: PermissionState,
    pub microphone: PermissionState,
    pub geolocation: PermissionState,
}

impl PermissionsEvidence {
    /// Result used when the permission query API is absent.
    pub fn unsupported() -> Self {
        Self::default()
    }
}

/// A geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in meters.
    pub accuracy: f64,
}

/// Why a geolocation fix was not obtained.
///
/// `code` follows the W3C `GeolocationPositionError` codes:
/// 1 = permission denied, 2 = position unavailable, 3 = timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoError {
    pub code: Option<u16>,
    pub message: String,
}

impl GeoError {
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;

    pub fn timeout() -> Self {
        Self {
            code: Some(Self::TIMEOUT),
            message: "Timeout expired".to_string(),
        }
    }
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of the geolocation probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoEvidence {
    pub supported: bool,
    pub allowed: bool,
    pub coords: Option<Coordinates>,
    pub error: Option<GeoError>,
}

impl GeoEvidence {
    /// The platform has no geolocation capability.
    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn allowed(coords: Coordinates) -> Self {
        Self {
            supported: true,
            allowed: true,
            coords: Some(coords),
            error: None,
        }
    }

    /// Denied, failed or timed out.
    pub fn refused(error: GeoError) -> Self {
        Self {
            supported: true,
            allowed: false,
            coords: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> EvidenceRecord {
        EvidenceRecord {
            captured_at: "2025-03-01T12:00:00.000Z".to_string(),
            user_agent: Some("Mozilla/5.0".to_string()),
            language: Some("pt-BR".to_string()),
            platform: None,
            timezone: Some("America/Sao_Paulo".to_string()),
            timezone_offset_minutes: Some(180),
            screen: ScreenEvidence {
                width: Some(1920),
                height: Some(1080),
                device_pixel_ratio: Some(2.0),
            },
            viewport: ViewportEvidence::default(),
            permissions: PermissionsEvidence {
                supported: true,
                camera: PermissionState::Granted,
                microphone: PermissionState::Prompt,
                geolocation: PermissionState::Denied,
            },
            geo: GeoEvidence::refused(GeoError {
                code: Some(GeoError::PERMISSION_DENIED),
                message: "User denied Geolocation".to_string(),
            }),
        }
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["capturedAt"], "2025-03-01T12:00:00.000Z");
        assert_eq!(value["timezoneOffsetMinutes"], 180);
        assert_eq!(value["screen"]["devicePixelRatio"], 2.0);
        assert_eq!(value["viewport"], json!({"innerWidth": null, "innerHeight": null}));
        assert!(value["platform"].is_null());
    }

    #[test]
    fn permission_states_are_lowercase_strings() {
        let value = serde_json::to_value(sample().permissions).unwrap();
        assert_eq!(
            value,
            json!({
                "supported": true,
                "camera": "granted",
                "microphone": "prompt",
                "geolocation": "denied"
            })
        );
    }

    #[test]
    fn unsupported_permissions_are_all_unknown() {
        let p = PermissionsEvidence::unsupported();
        assert!(!p.supported);
        assert_eq!(p.camera, PermissionState::Unknown);
        assert_eq!(p.microphone, PermissionState::Unknown);
        assert_eq!(p.geolocation, PermissionState::Unknown);
    }

    #[test]
    fn unknown_state_string_maps_to_unknown() {
        assert_eq!(
            PermissionState::from_state_str("granted"),
            PermissionState::Granted
        );
        assert_eq!(
            PermissionState::from_state_str("something-new"),
            PermissionState::Unknown
        );
    }

    #[test]
    fn unsupported_geo_has_null_coords_and_error() {
        let value = serde_json::to_value(GeoEvidence::unsupported()).unwrap();
        assert_eq!(
            value,
            json!({"supported": false, "allowed": false, "coords": null, "error": null})
        );
    }

    #[test]
    fn timeout_error_uses_code_three() {
        let err = GeoError::timeout();
        assert_eq!(err.code, Some(3));
        assert_eq!(err.to_string(), "[3] Timeout expired");
    }
}
