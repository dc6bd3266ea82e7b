use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{NotifyError, Result};

const DEVICE_SUFFIX: &str = ".json";

/// One build as published by the OTA/updater JSON.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub filename: String,
    pub version: String,
    pub romtype: String,
    /// Bytes.
    pub size: u64,
    pub url: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File holds nothing but whitespace; there is nothing to announce.
    Empty,
    Record(ArtifactRecord),
}

/// Read the device JSON and pull out `response[0]`.
pub async fn load(path: &Path) -> Result<LoadOutcome> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| NotifyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse(path, &contents)
}

fn parse(path: &Path, contents: &str) -> Result<LoadOutcome> {
    let contents = contents.trim();
    if contents.is_empty() {
        return Ok(LoadOutcome::Empty);
    }

    let doc: Value = serde_json::from_str(contents).map_err(|source| NotifyError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let entry = doc
        .get("response")
        .and_then(Value::as_array)
        .ok_or_else(|| NotifyError::MissingField("response".to_string()))?
        .first()
        .ok_or_else(|| NotifyError::MissingField("response[0]".to_string()))?;

    let record = ArtifactRecord::deserialize(entry)
        .map_err(|e| NotifyError::MissingField(format!("response[0]: {e}")))?;
    Ok(LoadOutcome::Record(record))
}

/// `devices/pixel7.json` -> `pixel7`.
pub fn device_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(DEVICE_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}
