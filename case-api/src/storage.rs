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

//! Per-case JSON file storage.
//!
//! Each case lives in `<cases_dir>/<caseId>.json`. Files are pretty-printed
//! and always replaced whole (write to a sibling temp file, then rename), so a
//! reader never observes a half-written case. Appends are read-modify-write
//! and are serialized through one lock per store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use meeting_evidence_types::{CaseFile, ServerEvidence};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

const MAX_CASE_ID_LEN: usize = 64;
const VALID_CASE_ID_PATTERN: &str = "^[a-zA-Z0-9-]+$";
const CLIENT_EVIDENCE_KEY: &str = "clientEvidence";

/// Errors returned by [`CaseStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not safe to use as a file name.
    #[error("invalid case id: {0}")]
    InvalidCaseId(&'static str),

    #[error("case '{0}' not found")]
    NotFound(String),

    #[error("case file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("case file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but its top level is not an object.
    #[error("case file '{0}' is not a JSON object")]
    NotAnObject(String),
}

/// Directory of case files.
#[derive(Debug, Clone)]
pub struct CaseStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Reject ids that could escape the cases directory or collide with temp files.
pub fn validate_case_id(case_id: &str) -> Result<(), StoreError> {
    static CASE_ID_RE: OnceLock<Regex> = OnceLock::new();

    if case_id.is_empty() {
        return Err(StoreError::InvalidCaseId("cannot be empty"));
    }
    if case_id.len() > MAX_CASE_ID_LEN {
        return Err(StoreError::InvalidCaseId("cannot exceed 64 characters"));
    }
    let re = CASE_ID_RE.get_or_init(|| Regex::new(VALID_CASE_ID_PATTERN).expect("valid regex"));
    if !re.is_match(case_id) {
        return Err(StoreError::InvalidCaseId(
            "may only contain letters, digits and '-'",
        ));
    }
    Ok(())
}

impl CaseStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, case_id: &str) -> PathBuf {
        self.dir.join(format!("{case_id}.json"))
    }

    /// Create a new case file holding `server_evidence` and no client evidence.
    ///
    /// The cases directory is created on first use.
    pub async fn create(&self, server_evidence: ServerEvidence) -> Result<CaseFile, StoreError> {
        validate_case_id(&server_evidence.case_id)?;
        let path = self.path_for(&server_evidence.case_id);
        let case = CaseFile::new(server_evidence);

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;
        write_replace(&path, &case).await?;
        Ok(case)
    }

    /// Append one `{receivedAt, data}` entry to the case's `clientEvidence`.
    ///
    /// Unknown top-level keys in the file are preserved. A missing or
    /// non-array `clientEvidence` is replaced by a fresh array. Returns the
    /// number of entries after the append.
    pub async fn append(
        &self,
        case_id: &str,
        data: Value,
        received_at: String,
    ) -> Result<usize, StoreError> {
        validate_case_id(case_id)?;
        let path = self.path_for(case_id);

        let _guard = self.write_lock.lock().await;
        let raw = read_case(&path, case_id).await?;
        let mut json: Value = serde_json::from_slice(&raw)?;
        let root = json
            .as_object_mut()
            .ok_or_else(|| StoreError::NotAnObject(case_id.to_string()))?;

        let entry = serde_json::json!({
            "receivedAt": received_at,
            "data": data,
        });
        let count = match root.get_mut(CLIENT_EVIDENCE_KEY) {
            Some(Value::Array(entries)) => {
                entries.push(entry);
                entries.len()
            }
            _ => {
                root.insert(CLIENT_EVIDENCE_KEY.to_string(), Value::Array(vec![entry]));
                1
            }
        };

        write_replace(&path, &json).await?;
        Ok(count)
    }

    /// Read a case back.
    pub async fn load(&self, case_id: &str) -> Result<CaseFile, StoreError> {
        validate_case_id(case_id)?;
        let raw = read_case(&self.path_for(case_id), case_id).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

async fn read_case(path: &Path, case_id: &str) -> Result<Vec<u8>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::NotFound(case_id.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

async fn write_replace<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
