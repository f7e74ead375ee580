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

//! Scriptable [`Platform`] used by the collector integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use evidence_collector::{
    Coordinates, GeoError, PermissionName, PermissionState, Platform, PositionOptions,
    ProbeError, ScreenEvidence, ViewportEvidence,
};

/// How the fake answers a position request.
#[derive(Debug, Clone)]
pub enum GeoBehavior {
    /// `navigator.geolocation` does not exist.
    Absent,
    /// Resolve with a fix after `delay`.
    Fix { coords: Coordinates, delay: Duration },
    /// Reject with `error` after `delay`.
    Fail { error: GeoError, delay: Duration },
    /// Never settle.
    Hang,
}

pub struct FakePlatform {
    pub user_agent: Result<String, ProbeError>,
    pub language: Result<String, ProbeError>,
    pub languages: Result<Vec<String>, ProbeError>,
    pub platform: Result<String, ProbeError>,
    pub timezone: Result<String, ProbeError>,
    pub timezone_offset: Result<i32, ProbeError>,
    pub screen: Result<ScreenEvidence, ProbeError>,
    pub viewport: Result<ViewportEvidence, ProbeError>,
    /// `None` means the permission query API is absent.
    pub permissions: Option<HashMap<PermissionName, Result<PermissionState, ProbeError>>>,
    pub permission_delay: Duration,
    pub geo: GeoBehavior,
    /// Each call to `now()` returns this and advances it by one second.
    pub clock: Cell<DateTime<Utc>>,
    pub position_requests: RefCell<Vec<PositionOptions>>,
}

pub fn start_of_test_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn sample_coords() -> Coordinates {
    Coordinates {
        latitude: -23.5505,
        longitude: -46.6333,
        accuracy: 35.0,
    }
}

pub fn denied() -> GeoError {
    GeoError {
        code: Some(GeoError::PERMISSION_DENIED),
        message: "User denied Geolocation".to_string(),
    }
}

impl FakePlatform {
    /// A desktop browser where everything works and everything is granted.
    pub fn browser() -> Self {
        let permissions = PermissionName::ALL
            .into_iter()
            .map(|name| (name, Ok(PermissionState::Granted)))
            .collect();
        Self {
            user_agent: Ok("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string()),
            language: Ok("pt-BR".to_string()),
            languages: Ok(vec!["pt-BR".to_string(), "en".to_string()]),
            platform: Ok("Linux x86_64".to_string()),
            timezone: Ok("America/Sao_Paulo".to_string()),
            timezone_offset: Ok(180),
            screen: Ok(ScreenEvidence {
                width: Some(1920),
                height: Some(1080),
                device_pixel_ratio: Some(1.5),
            }),
            viewport: Ok(ViewportEvidence {
                inner_width: Some(1280),
                inner_height: Some(720),
            }),
            permissions: Some(permissions),
            permission_delay: Duration::ZERO,
            geo: GeoBehavior::Fix {
                coords: sample_coords(),
                delay: Duration::from_millis(50),
            },
            clock: Cell::new(start_of_test_clock()),
            position_requests: RefCell::new(Vec::new()),
        }
    }

    /// A platform where every read fails and no optional API exists.
    pub fn bare() -> Self {
        let broken = || ProbeError::Failed("blocked".to_string());
        Self {
            user_agent: Err(broken()),
            language: Err(broken()),
            languages: Err(broken()),
            platform: Err(broken()),
            timezone: Err(broken()),
            timezone_offset: Err(broken()),
            screen: Err(broken()),
            viewport: Err(broken()),
            permissions: None,
            permission_delay: Duration::ZERO,
            geo: GeoBehavior::Absent,
            clock: Cell::new(start_of_test_clock()),
            position_requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_geo(mut self, geo: GeoBehavior) -> Self {
        self.geo = geo;
        self
    }

    pub fn without_permissions_api(mut self) -> Self {
        self.permissions = None;
        self
    }

    pub fn with_permission(
        mut self,
        name: PermissionName,
        result: Result<PermissionState, ProbeError>,
    ) -> Self {
        self.permissions
            .get_or_insert_with(HashMap::new)
            .insert(name, result);
        self
    }
}

#[async_trait(?Send)]
impl Platform for FakePlatform {
    fn user_agent(&self) -> Result<String, ProbeError> {
        self.user_agent.clone()
    }

    fn language(&self) -> Result<String, ProbeError> {
        self.language.clone()
    }

    fn languages(&self) -> Result<Vec<String>, ProbeError> {
        self.languages.clone()
    }

    fn platform(&self) -> Result<String, ProbeError> {
        self.platform.clone()
    }

    fn timezone(&self) -> Result<String, ProbeError> {
        self.timezone.clone()
    }

    fn timezone_offset_minutes(&self) -> Result<i32, ProbeError> {
        self.timezone_offset.clone()
    }

    fn screen(&self) -> Result<ScreenEvidence, ProbeError> {
        self.screen.clone()
    }

    fn viewport(&self) -> Result<ViewportEvidence, ProbeError> {
        self.viewport.clone()
    }

    fn supports_permission_query(&self) -> bool {
        self.permissions.is_some()
    }

    async fn query_permission(&self, name: PermissionName) -> Result<PermissionState, ProbeError> {
        if !self.permission_delay.is_zero() {
            tokio::time::sleep(self.permission_delay).await;
        }
        self.permissions
            .as_ref()
            .and_then(|map| map.get(&name).cloned())
            .unwrap_or(Err(ProbeError::Unsupported))
    }

    fn supports_geolocation(&self) -> bool {
        !matches!(self.geo, GeoBehavior::Absent)
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError> {
        self.position_requests.borrow_mut().push(*options);
        match self.geo.clone() {
            GeoBehavior::Absent => Err(GeoError {
                code: None,
                message: "absent".to_string(),
            }),
            GeoBehavior::Fix { coords, delay } => {
                tokio::time::sleep(delay).await;
                Ok(coords)
            }
            GeoBehavior::Fail { error, delay } => {
                tokio::time::sleep(delay).await;
                Err(error)
            }
            GeoBehavior::Hang => futures::future::pending().await,
        }
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        let now = self.clock.get();
        self.clock.set(now + chrono::Duration::seconds(1));
        now
    }
}
