//! Persisted usage counter
//!
//! The counter lives in a small JSON key-value file under a fixed key. Reads
//! are best-effort: anything unreadable counts as 0.

use crate::error::{ForecastError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the counter is stored under
pub const USAGE_COUNTER_KEY: &str = "forecastUsageCount";

/// Default state file, relative to the working directory
pub const DEFAULT_STATE_PATH: &str = "forecast_state.json";

/// Storage backend for a single integer
pub trait CounterStore: Send + Sync {
    /// Stored value, 0 if absent or unreadable
    fn get(&self) -> u64;

    fn set(&self, value: u64) -> Result<()>;
}

/// Counter stored in a JSON object file
#[derive(Debug)]
pub struct FileCounterStore {
    path: PathBuf,
    key: String,
    // Serializes read-modify-write of the file
    lock: Mutex<()>,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, USAGE_COUNTER_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole key-value file; missing or malformed yields an empty map
    fn read_map(&self) -> Map<String, Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                log::warn!("could not read {}: {}; starting from empty state", self.path.display(), e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                log::warn!("{} is not a JSON object; starting from empty state", self.path.display());
                Map::new()
            }
        }
    }
}

impl CounterStore for FileCounterStore {
    fn get(&self) -> u64 {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.read_map().get(&self.key) {
            None => 0,
            Some(value) => value.as_u64().unwrap_or_else(|| {
                log::warn!("stored {} is not a counter ({}); using 0", self.key, value);
                0
            }),
        }
    }

    fn set(&self, value: u64) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map();
        map.insert(self.key.clone(), Value::from(value));

        let text = serde_json::to_string_pretty(&Value::Object(map))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ForecastError::storage(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| ForecastError::storage(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| ForecastError::storage(&self.path, e))?;
        Ok(())
    }
}

/// In-process store, used by tests and when persistence is disabled
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    value: Mutex<u64>,
}

impl MemoryCounterStore {
    pub fn new(value: u64) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self) -> u64 {
        *self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, value: u64) -> Result<()> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value;
        Ok(())
    }
}

/// Usage counter read once from its store and rewritten on every increment
pub struct UsageCounter {
    store: Box<dyn CounterStore>,
    value: Mutex<u64>,
}

impl UsageCounter {
    pub fn load(store: Box<dyn CounterStore>) -> Self {
        let value = store.get();
        log::debug!("usage counter loaded: {}", value);
        Self {
            store,
            value: Mutex::new(value),
        }
    }

    pub fn value(&self) -> u64 {
        *self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add one and persist; the in-memory count advances even if the write fails
    pub fn increment(&self) -> Result<u64> {
        let mut value = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *value += 1;
        self.store.set(*value)?;
        Ok(*value)
    }
}

impl std::fmt::Debug for UsageCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageCounter").field("value", &self.value()).finish()
    }
}
