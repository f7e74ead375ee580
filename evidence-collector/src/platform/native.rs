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

//! Native (desktop / server / CLI) platform.
//!
//! There is no browser here, so locale and timezone come from the process
//! environment (`LC_ALL` / `LC_MESSAGES` / `LANG`, `LANGUAGE`, `TZ`, the
//! `/etc/localtime` link). Permission queries, geolocation and display
//! geometry are reported as unsupported. Timers use `tokio`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use meeting_evidence_types::evidence::{
    Coordinates, GeoError, PermissionState, ScreenEvidence, ViewportEvidence,
};

use super::{PermissionName, Platform, PositionOptions};
use crate::error::ProbeError;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// [`Platform`] backed by the process environment.
#[derive(Debug, Clone)]
pub struct NativePlatform {
    user_agent: String,
    vars: HashMap<String, String>,
    localtime_zone: Option<String>,
}

impl NativePlatform {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        let mut platform = Self::with_vars(std::env::vars());
        platform.localtime_zone = read_localtime_zone();
        platform
    }

    /// Build from an explicit set of environment variables.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            localtime_zone: None,
        }
    }

    /// Override the reported user agent (e.g. `"my-bot/1.2"`).
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Convert a POSIX locale (`pt_BR.UTF-8@euro`) to a BCP 47 tag (`pt-BR`).
///
/// `C` and `POSIX` carry no language and yield `None`.
pub(crate) fn posix_locale_to_tag(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Zone name from a `/etc/localtime -> /usr/share/zoneinfo/Area/City` link.
fn read_localtime_zone() -> Option<String> {
    let target = std::fs::read_link("/etc/localtime").ok()?;
    zone_from_zoneinfo_path(&target.to_string_lossy())
}

fn zone_from_zoneinfo_path(path: &str) -> Option<String> {
    let (_, zone) = path.split_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

#[async_trait(?Send)]
impl Platform for NativePlatform {
    fn user_agent(&self) -> Result<String, ProbeError> {
        Ok(self.user_agent.clone())
    }

    fn language(&self) -> Result<String, ProbeError> {
        LOCALE_VARS
            .iter()
            .filter_map(|key| self.var(key))
            .find_map(posix_locale_to_tag)
            .ok_or(ProbeError::Unsupported)
    }

    fn languages(&self) -> Result<Vec<String>, ProbeError> {
        Ok(self
            .var("LANGUAGE")
            .map(|list| list.split(':').filter_map(posix_locale_to_tag).collect())
            .unwrap_or_default())
    }

    fn platform(&self) -> Result<String, ProbeError> {
        Ok(format!(
            "{} {}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ))
    }

    fn timezone(&self) -> Result<String, ProbeError> {
        // TZ=":Europe/Lisbon" is valid POSIX; absolute paths are not zone names.
        if let Some(tz) = self.var("TZ") {
            let tz = tz.trim_start_matches(':');
            if let Some(zone) = zone_from_zoneinfo_path(tz) {
                return Ok(zone);
            }
            if !tz.is_empty() && !tz.starts_with('/') {
                return Ok(tz.to_string());
            }
        }
        self.localtime_zone.clone().ok_or(ProbeError::Unsupported)
    }

    fn timezone_offset_minutes(&self) -> Result<i32, ProbeError> {
        let east_secs = Local::now().offset().local_minus_utc();
        Ok(-east_secs / 60)
    }

    fn screen(&self) -> Result<ScreenEvidence, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    fn viewport(&self) -> Result<ViewportEvidence, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    fn supports_permission_query(&self) -> bool {
        false
    }

    async fn query_permission(&self, _name: PermissionName) -> Result<PermissionState, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    fn supports_geolocation(&self) -> bool {
        false
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates, GeoError> {
        Err(GeoError {
            code: Some(GeoError::POSITION_UNAVAILABLE),
            message: "geolocation is not available on this platform".to_string(),
        })
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
