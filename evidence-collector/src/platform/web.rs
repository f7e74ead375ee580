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

//! Browser platform built on `web-sys` and `js-sys`.
//!
//! Capability checks go through `Reflect` instead of the typed bindings:
//! `navigator.permissions` and `navigator.geolocation` are absent in some
//! embedded webviews and insecure contexts, and the typed getters would
//! throw rather than report that.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::channel::oneshot;
use js_sys::{Array, Function, Object, Reflect};
use meeting_evidence_types::evidence::{
    Coordinates, GeoError, PermissionState, ScreenEvidence, ViewportEvidence,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::{PermissionName, Platform, PositionOptions};
use crate::error::ProbeError;

/// [`Platform`] backed by the browser's `window` and `navigator`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebPlatform;

impl WebPlatform {
    pub fn new() -> Self {
        Self
    }
}

fn window() -> Result<web_sys::Window, ProbeError> {
    web_sys::window().ok_or(ProbeError::Unsupported)
}

fn js_error(err: JsValue) -> ProbeError {
    ProbeError::Failed(
        err.as_string()
            .or_else(|| {
                Reflect::get(&err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// `navigator?.[object]?.[method]` is a function.
fn navigator_has(object: &str, method: &str) -> bool {
    web_sys::window()
        .and_then(|w| get(w.navigator().as_ref(), object))
        .and_then(|o| get(&o, method))
        .map(|m| m.is_function())
        .unwrap_or(false)
}

fn method(target: &JsValue, key: &str) -> Option<Function> {
    get(target, key).and_then(|f| f.dyn_into::<Function>().ok())
}

/// `new Intl.DateTimeFormat().resolvedOptions().timeZone` read off `global`.
///
/// Every step goes through `Reflect` so a missing `Intl` or a throwing
/// constructor comes back as an error instead of unwinding through wasm.
fn resolved_time_zone(global: &JsValue) -> Result<String, ProbeError> {
    let intl = get(global, "Intl").ok_or(ProbeError::Unsupported)?;
    let constructor = method(&intl, "DateTimeFormat").ok_or(ProbeError::Unsupported)?;
    let format = Reflect::construct(&constructor, &Array::new()).map_err(js_error)?;
    let resolved_options = method(&format, "resolvedOptions").ok_or(ProbeError::Unsupported)?;
    let resolved = resolved_options.call0(&format).map_err(js_error)?;
    get(&resolved, "timeZone")
        .and_then(|tz| tz.as_string())
        .ok_or(ProbeError::Unsupported)
}

fn permission_state_from(status: &JsValue) -> PermissionState {
    get(status, "state")
        .and_then(|s| s.as_string())
        .map(|s| PermissionState::from_state_str(&s))
        .unwrap_or_default()
}

fn to_dimension(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0).then_some(value as u32)
}

fn coordinates_from(position: &JsValue) -> Result<Coordinates, GeoError> {
    let unavailable = || GeoError {
        code: Some(GeoError::POSITION_UNAVAILABLE),
        message: "position has no coordinates".to_string(),
    };
    let coords = get(position, "coords").ok_or_else(unavailable)?;
    let read = |key: &str| get(&coords, key).and_then(|v| v.as_f64());
    Ok(Coordinates {
        latitude: read("latitude").ok_or_else(unavailable)?,
        longitude: read("longitude").ok_or_else(unavailable)?,
        accuracy: read("accuracy").ok_or_else(unavailable)?,
    })
}

fn geo_error_from(error: &JsValue) -> GeoError {
    GeoError {
        code: get(error, "code")
            .and_then(|c| c.as_f64())
            .map(|c| c as u16),
        message: get(error, "message")
            .and_then(|m| m.as_string())
            .or_else(|| error.as_string())
            .unwrap_or_else(|| format!("{error:?}")),
    }
}

#[async_trait(?Send)]
impl Platform for WebPlatform {
    fn user_agent(&self) -> Result<String, ProbeError> {
        window()?.navigator().user_agent().map_err(js_error)
    }

    fn language(&self) -> Result<String, ProbeError> {
        window()?
            .navigator()
            .language()
            .ok_or(ProbeError::Unsupported)
    }

    fn languages(&self) -> Result<Vec<String>, ProbeError> {
        Ok(window()?
            .navigator()
            .languages()
            .iter()
            .filter_map(|v| v.as_string())
            .collect())
    }

    fn platform(&self) -> Result<String, ProbeError> {
        window()?.navigator().platform().map_err(js_error)
    }

    fn timezone(&self) -> Result<String, ProbeError> {
        resolved_time_zone(&js_sys::global())
    }

    fn timezone_offset_minutes(&self) -> Result<i32, ProbeError> {
        let offset = js_sys::Date::new_0().get_timezone_offset();
        if offset.is_finite() {
            Ok(offset as i32)
        } else {
            Err(ProbeError::Failed(format!("invalid timezone offset {offset}")))
        }
    }

    fn screen(&self) -> Result<ScreenEvidence, ProbeError> {
        let window = window()?;
        let screen = window.screen().map_err(js_error)?;
        Ok(ScreenEvidence {
            width: screen.width().ok().and_then(|w| u32::try_from(w).ok()),
            height: screen.height().ok().and_then(|h| u32::try_from(h).ok()),
            device_pixel_ratio: Some(window.device_pixel_ratio()).filter(|r| r.is_finite()),
        })
    }

    fn viewport(&self) -> Result<ViewportEvidence, ProbeError> {
        let window = window()?;
        Ok(ViewportEvidence {
            inner_width: window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .and_then(to_dimension),
            inner_height: window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .and_then(to_dimension),
        })
    }

    fn supports_permission_query(&self) -> bool {
        navigator_has("permissions", "query")
    }

    async fn query_permission(&self, name: PermissionName) -> Result<PermissionState, ProbeError> {
        let permissions = window()?.navigator().permissions().map_err(js_error)?;
        let descriptor = Object::new();
        Reflect::set(
            &descriptor,
            &JsValue::from_str("name"),
            &JsValue::from_str(name.as_str()),
        )
        .map_err(js_error)?;

        // Firefox rejects "camera"/"microphone" with a TypeError.
        let promise = permissions.query(&descriptor).map_err(js_error)?;
        let status = JsFuture::from(promise).await.map_err(js_error)?;

        Ok(permission_state_from(&status))
    }

    fn supports_geolocation(&self) -> bool {
        navigator_has("geolocation", "getCurrentPosition")
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError> {
        let geolocation = window()
            .and_then(|w| w.navigator().geolocation().map_err(js_error))
            .map_err(|e| GeoError {
                code: None,
                message: e.to_string(),
            })?;

        let (tx, rx) = oneshot::channel::<Result<Coordinates, GeoError>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(coordinates_from(&position));
                }
            })
        };
        let on_error = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(geo_error_from(&error)));
                }
            })
        };

        let js_options = web_sys::PositionOptions::new();
        js_options.set_enable_high_accuracy(options.enable_high_accuracy);
        js_options.set_timeout(millis(options.timeout));
        js_options.set_maximum_age(millis(options.maximum_age));

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref::<Function>(),
                Some(on_error.as_ref().unchecked_ref::<Function>()),
                &js_options,
            )
            .map_err(|e| geo_error_from(&e))?;
        let callbacks = PositionCallbacks {
            closures: Some((on_success, on_error)),
        };

        let result = rx.await.unwrap_or_else(|_| {
            Err(GeoError {
                code: None,
                message: "geolocation request was abandoned".to_string(),
            })
        });
        callbacks.release();
        result
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

/// Callbacks handed to `getCurrentPosition`; the browser calls at most one.
///
/// Both are freed once the request settles. If the request future is dropped
/// first (the collector's own timeout), JS may still call one later, so they
/// are leaked instead: one pair per abandoned request.
struct PositionCallbacks {
    closures: Option<(Closure<dyn FnMut(JsValue)>, Closure<dyn FnMut(JsValue)>)>,
}

impl PositionCallbacks {
    fn release(mut self) {
        self.closures = None;
    }
}

impl Drop for PositionCallbacks {
    fn drop(&mut self) {
        if let Some((on_success, on_error)) = self.closures.take() {
            on_success.forget();
            on_error.forget();
        }
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
