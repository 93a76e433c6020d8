//! Preference store — the handful of scalars that survive restarts
//!
//! Backed by a TOML key-value file. An unreadable or missing file silently
//! yields built-in defaults; preference loss must never break gameplay.

use fizz_core::{FizzError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// TOML-backed key-value preferences
pub struct PrefStore {
    data: HashMap<String, toml::Value>,
    path: Option<PathBuf>,
}

impl PrefStore {
    /// An in-memory store that never persists (tests, headless)
    pub fn in_memory() -> Self {
        Self {
            data: HashMap::new(),
            path: None,
        }
    }

    /// Load from a file, falling back to an empty store on any failure
    pub fn load(path: &Path) -> Self {
        let data = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str::<HashMap<String, toml::Value>>(&content).ok())
            .unwrap_or_default();

        Self {
            data,
            path: Some(path.to_path_buf()),
        }
    }

    /// Write the store back to its file. A no-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = toml::to_string_pretty(&self.data)?;
        std::fs::write(path, content)
            .map_err(|e| FizzError::PrefsError(format!("write {}: {e}", path.display())))
    }

    pub fn set_f64(&mut self, key: &str, value: f64) {
        self.data.insert(key.to_string(), toml::Value::Float(value));
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.data.get(key) {
            Some(toml::Value::Float(v)) => *v,
            Some(toml::Value::Integer(v)) => *v as f64,
            _ => default,
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.data
            .insert(key.to_string(), toml::Value::Boolean(value));
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.data.get(key) {
            Some(toml::Value::Boolean(v)) => *v,
            _ => default,
        }
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.data
            .insert(key.to_string(), toml::Value::String(value.to_string()));
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.data.get(key) {
            Some(toml::Value::String(v)) => v.clone(),
            _ => default.to_string(),
        }
    }
}
