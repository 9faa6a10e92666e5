use crate::error::{FragmentError, Result};
use crate::key::derive_key;
use crate::walker::Fragment;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;

/// Merged JSON object plus the fragments that were left out of it.
#[derive(Debug, Default)]
pub struct JsonAggregate {
    pub entries: Map<String, Value>,
    pub errors: Vec<FragmentError>,
}

impl JsonAggregate {
    /// Serializes the merged mapping as a single JSON object. Keys come out sorted.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.entries)?)
    }
}

/// Parses every fragment as JSON and merges them into one object keyed by derived key.
///
/// Unreadable and unparsable fragments are logged and recorded, never fatal. When two
/// fragments derive the same key the one visited later replaces the earlier one.
pub fn aggregate_json<I>(fragments: I, suffix: &str) -> JsonAggregate
where
    I: IntoIterator<Item = std::result::Result<Fragment, FragmentError>>,
{
    let mut out = JsonAggregate::default();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();

    for item in fragments {
        let fragment = match item {
            Ok(fragment) => fragment,
            Err(err) => {
                log::warn!("Skipping fragment: {err}");
                out.errors.push(err);
                continue;
            }
        };

        let value: Value = match serde_json::from_slice(&fragment.content) {
            Ok(value) => value,
            Err(source) => {
                let err = FragmentError::Parse {
                    path: fragment.path,
                    source,
                };
                log::warn!("Skipping fragment: {err}");
                out.errors.push(err);
                continue;
            }
        };

        // JSON object keys are UTF-8; undecodable name bytes become U+FFFD.
        let key = String::from_utf8_lossy(derive_key(fragment.name_bytes(), suffix)).into_owned();
        if let Some(previous) = origins.insert(key.clone(), fragment.path.clone()) {
            log::debug!(
                "Duplicate key {key:?}: {} overrides {}",
                fragment.path.display(),
                previous.display()
            );
        }
        out.entries.insert(key, value);
    }

    out
}
