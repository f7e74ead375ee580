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

//! Axum extractor for the request metadata recorded as server evidence.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// What the server can observe about the caller.
///
/// Never rejects: every field is optional.
///
/// ```ignore
/// async fn my_handler(meta: RequestMeta) { ... }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// First hop of `X-Forwarded-For`, else the peer address.
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub host: Option<String>,
}

fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    header_value(headers, X_FORWARDED_FOR)?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

impl<S: Send + Sync> FromRequestParts<S> for RequestMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(RequestMeta {
            ip: forwarded_ip(headers).or(peer),
            user_agent: header_value(headers, header::USER_AGENT),
            accept_language: header_value(headers, header::ACCEPT_LANGUAGE),
            host: header_value(headers, header::HOST),
        })
    }
}
