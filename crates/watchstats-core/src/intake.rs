//! Reading a watch-history export from disk and locating its event array.

use std::path::Path;

use serde_json::Value;

use crate::IntakeError;

/// Object keys that are known to wrap the event array, checked in order.
const WRAPPER_KEYS: &[&str] = &["items", "watchHistory", "videos"];

/// Read and parse an export file, enforcing the `.json` extension and a
/// byte-size limit before anything is loaded into memory.
///
/// # Errors
///
/// Returns [`IntakeError`] if the path is not a `.json` file, exceeds
/// `max_bytes`, cannot be read, or does not contain valid JSON.
pub fn read_export(path: &Path, max_bytes: u64) -> Result<Value, IntakeError> {
    let shown = path.display().to_string();

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(IntakeError::NotJson { path: shown });
    }

    let io_err = |source| IntakeError::Io {
        path: shown.clone(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_bytes {
        return Err(IntakeError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let value = serde_json::from_str(&content).map_err(|source| IntakeError::Parse {
        path: shown.clone(),
        source,
    })?;

    tracing::debug!(path = %shown, bytes = size, "export parsed");
    Ok(value)
}

/// Extract the event array from a parsed export.
///
/// Accepts a bare array, or an object holding the array under one of
/// `items`, `watchHistory` or `videos`.
///
/// # Errors
///
/// Returns [`IntakeError::NoEvents`] when no non-empty array can be found.
pub fn extract_events(data: Value) -> Result<Vec<Value>, IntakeError> {
    let events = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    if events.is_empty() {
        return Err(IntakeError::NoEvents);
    }
    Ok(events)
}
