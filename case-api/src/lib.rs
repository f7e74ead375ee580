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

//! Case evidence API library.
//!
//! This crate provides the Axum router, application state, configuration and
//! per-case file storage for the case evidence service. The binary entry
//! point (`main.rs`) is a thin wrapper that calls into this library.

pub mod config;
pub mod error;
pub mod request_meta;
pub mod routes;
pub mod state;
pub mod storage;
pub mod token;
