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

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_VIDEOSDK_API_URL: &str = "https://api.videosdk.live";

/// Configuration for the case API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:3000").
    pub listen_addr: String,
    /// Directory holding one `<caseId>.json` file per case.
    pub cases_dir: PathBuf,
    /// VideoSDK credentials. `None` if either variable is unset or empty.
    pub videosdk: Option<VideoSdkConfig>,
    /// Base URL of the VideoSDK REST API.
    pub videosdk_api_url: String,
    /// VideoSDK token time-to-live in seconds (default: 600 = 10 minutes).
    pub token_ttl_secs: i64,
}

/// VideoSDK API credentials.
#[derive(Debug, Clone)]
pub struct VideoSdkConfig {
    pub api_key: String,
    pub secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:3000"`)
    /// - `CASES_DIR` (default: `"./cases"`)
    /// - `VIDEOSDK_API_KEY`, `VIDEOSDK_SECRET` (both required to issue tokens)
    /// - `VIDEOSDK_API_URL` (default: `"https://api.videosdk.live"`)
    /// - `TOKEN_TTL_SECS` (default: `"600"`)
    pub fn from_env() -> Result<Self, String> {
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let cases_dir = env::var("CASES_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cases"));
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse::<i64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid integer")?;
        if token_ttl_secs <= 0 {
            return Err("TOKEN_TTL_SECS must be positive".to_string());
        }
        let videosdk_api_url = env::var("VIDEOSDK_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEOSDK_API_URL.to_string());

        let api_key = env::var("VIDEOSDK_API_KEY").ok().filter(|s| !s.is_empty());
        let secret = env::var("VIDEOSDK_SECRET").ok().filter(|s| !s.is_empty());
        let videosdk = match (api_key, secret) {
            (Some(api_key), Some(secret)) => Some(VideoSdkConfig { api_key, secret }),
            _ => None,
        };

        Ok(Self {
            listen_addr,
            cases_dir,
            videosdk,
            videosdk_api_url: videosdk_api_url.trim_end_matches('/').to_string(),
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "LISTEN_ADDR",
        "CASES_DIR",
        "VIDEOSDK_API_KEY",
        "VIDEOSDK_SECRET",
        "VIDEOSDK_API_URL",
        "TOKEN_TTL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_nothing_is_set() {
        clear_env();
        let config = Config::from_env().expect("defaults are valid");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.cases_dir, PathBuf::from("cases"));
        assert!(config.videosdk.is_none());
        assert_eq!(config.videosdk_api_url, DEFAULT_VIDEOSDK_API_URL);
        assert_eq!(config.token_ttl_secs, 600);
    }

    #[test]
    #[serial]
    fn videosdk_requires_both_key_and_secret() {
        clear_env();
        env::set_var("VIDEOSDK_API_KEY", "key");
        assert!(Config::from_env().unwrap().videosdk.is_none());

        env::set_var("VIDEOSDK_SECRET", "secret");
        let videosdk = Config::from_env().unwrap().videosdk.expect("both set");
        assert_eq!(videosdk.api_key, "key");
        assert_eq!(videosdk.secret, "secret");
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_ttl_is_rejected() {
        clear_env();
        env::set_var("TOKEN_TTL_SECS", "ten minutes");
        assert!(Config::from_env().is_err());
        env::set_var("TOKEN_TTL_SECS", "0");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn api_url_trailing_slash_is_trimmed() {
        clear_env();
        env::set_var("VIDEOSDK_API_URL", "http://localhost:9000/");
        assert_eq!(
            Config::from_env().unwrap().videosdk_api_url,
            "http://localhost:9000"
        );
        clear_env();
    }
}
