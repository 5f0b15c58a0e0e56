//! Caller-owned plugin settings.
//!
//! A flat JSON object persisted next to the other data files. The slideshow
//! only cares about `image_index`; other keys are kept untouched so a host can
//! store its own values in the same file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Key holding the last-shown slideshow index
pub const IMAGE_INDEX_KEY: &str = "image_index";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Non-negative integer under `key`, or `default` when missing or of another type
    pub fn get_index(&self, key: &str, default: usize) -> usize {
        self.values
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn set_index(&mut self, key: &str, index: usize) {
        self.insert(key, index as u64);
    }

    /// Current slideshow position (`image_index`, default 0)
    pub fn image_index(&self) -> usize {
        self.get_index(IMAGE_INDEX_KEY, 0)
    }

    pub fn set_image_index(&mut self, index: usize) {
        self.set_index(IMAGE_INDEX_KEY, index);
    }

    /// Load from JSON. A missing file yields empty settings.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No settings at {}, starting fresh", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write settings: {}", path.display()))
    }
}
